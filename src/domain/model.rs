use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub id: String,
    pub number: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end_time: Option<DateTime<Utc>>,
}

impl fmt::Display for Launch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} \"{}\"", self.id, self.number, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// 只讀第一頁，不會跟隨分頁
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchPage {
    #[serde(default)]
    pub content: Vec<Launch>,
    #[serde(default)]
    pub page: Option<PageInfo>,
}

impl LaunchPage {
    pub fn ids(&self) -> Vec<String> {
        self.content.iter().map(|launch| launch.id.clone()).collect()
    }
}

/// 合併策略，原樣轉送給服務端
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeType(pub String);

impl MergeType {
    pub const DEEP: &'static str = "DEEP";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MergeType {
    fn default() -> Self {
        Self(Self::DEEP.to_string())
    }
}

impl From<&str> for MergeType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed window sent with every merge: `[now - 10h, now - 1min]`.
///
/// The bounds are not derived from the merged launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MergeWindow {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::hours(10),
            end: now - Duration::minutes(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub name: String,
    pub merge_type: MergeType,
    pub launches: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
}

impl MergeRequest {
    pub fn new(name: String, merge_type: MergeType, launches: Vec<String>, window: MergeWindow) -> Self {
        Self {
            name,
            merge_type,
            launches,
            start_time: window.start,
            end_time: window.end,
        }
    }
}

/// 合併後新 launch 的識別碼
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResource {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub filtering_field: String,
    pub condition: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOrder {
    pub sorting_column: String,
    pub is_asc: bool,
}

/// Saved filter stored on the server and referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub orders: Vec<FilterOrder>,
}

impl UserFilter {
    /// 轉成 launch 查詢參數：每個條件 `filter.{condition}.{field}`，每個排序 `page.sort`
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .conditions
            .iter()
            .map(|c| {
                (
                    format!("filter.{}.{}", c.condition, c.filtering_field),
                    c.value.clone(),
                )
            })
            .collect();

        params.extend(self.orders.iter().map(|o| {
            let direction = if o.is_asc { "ASC" } else { "DESC" };
            (
                "page.sort".to_string(),
                format!("{},{}", o.sorting_column, direction),
            )
        }));

        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilterPage {
    #[serde(default)]
    pub content: Vec<UserFilter>,
}
