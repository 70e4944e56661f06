use crate::config::{ListArgs, MergeArgs};
use crate::domain::model::{LaunchPage, MergeRequest, MergeType, MergeWindow};
use crate::domain::ports::LaunchService;
use crate::utils::error::{Result, RpError};
use chrono::{DateTime, Utc};
use std::io::Write;

/// Which list call to make, resolved once from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchFilter {
    None,
    Named(String),
    /// Raw expressions already joined with `&`
    Raw(String),
}

impl LaunchFilter {
    /// 原始過濾條件優先，其次是命名過濾器
    pub fn from_args(filters: &[String], filter_name: Option<&str>) -> Self {
        if !filters.is_empty() {
            return LaunchFilter::Raw(filters.join("&"));
        }
        match filter_name {
            Some(name) if !name.is_empty() => LaunchFilter::Named(name.to_string()),
            _ => LaunchFilter::None,
        }
    }

    pub async fn fetch<S: LaunchService + ?Sized>(&self, service: &S) -> Result<LaunchPage> {
        match self {
            LaunchFilter::Raw(filter) => service.get_launches_by_filter_string(filter).await,
            LaunchFilter::Named(name) => service.get_launches_by_filter_name(name).await,
            LaunchFilter::None => service.get_launches().await,
        }
    }
}

pub async fn list_launches<S, W>(service: &S, args: &ListArgs, out: &mut W) -> Result<()>
where
    S: LaunchService + ?Sized,
    W: Write,
{
    let filter = LaunchFilter::from_args(&args.filters, args.filter_name.as_deref());
    tracing::debug!("Listing launches with {:?}", filter);

    let launches = filter.fetch(service).await?;
    tracing::debug!("Received {} launches", launches.content.len());

    for launch in &launches.content {
        writeln!(out, "{}", launch)?;
    }
    Ok(())
}

/// Explicit IDs win over the filter. The filter is looked up by *name*,
/// unlike `launch list --filter` which takes raw expressions.
pub async fn get_merge_ids<S>(service: &S, args: &MergeArgs) -> Result<Vec<String>>
where
    S: LaunchService + ?Sized,
{
    if !args.ids.is_empty() {
        return Ok(args.ids.clone());
    }

    let filter = match args.filter.as_deref() {
        Some(filter) if !filter.is_empty() => filter,
        _ => return Err(RpError::MissingInput),
    };

    let launches = service.get_launches_by_filter_name(filter).await?;
    Ok(launches.ids())
}

pub async fn merge_launches<S, W>(service: &S, args: &MergeArgs, out: &mut W) -> Result<()>
where
    S: LaunchService + ?Sized,
    W: Write,
{
    merge_launches_at(service, args, Utc::now(), out).await
}

pub async fn merge_launches_at<S, W>(
    service: &S,
    args: &MergeArgs,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<()>
where
    S: LaunchService + ?Sized,
    W: Write,
{
    let ids = get_merge_ids(service, args).await?;
    let request = build_merge_request(args, ids, now);
    tracing::info!(
        "Merging {} launches into '{}' ({})",
        request.launches.len(),
        request.name,
        request.merge_type
    );

    let merged = service.merge_launches(&request).await?;
    writeln!(out, "{}", merged.id)?;
    Ok(())
}

pub fn build_merge_request(args: &MergeArgs, ids: Vec<String>, now: DateTime<Utc>) -> MergeRequest {
    let merge_type = if args.merge_type.is_empty() {
        MergeType::default()
    } else {
        MergeType::from(args.merge_type.as_str())
    };

    MergeRequest::new(args.name.clone(), merge_type, ids, MergeWindow::ending_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Launch, LaunchResource};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Launches,
        ByFilterString(String),
        ByFilterName(String),
        Merge(MergeRequest),
    }

    #[derive(Clone, Default)]
    struct MockService {
        calls: Arc<Mutex<Vec<Call>>>,
        page: LaunchPage,
        fail: bool,
    }

    impl MockService {
        fn with_launches(ids: &[&str]) -> Self {
            let content = ids
                .iter()
                .enumerate()
                .map(|(i, id)| Launch {
                    id: id.to_string(),
                    number: i as i64 + 1,
                    name: format!("launch {}", i + 1),
                    description: None,
                    status: None,
                    start_time: None,
                    end_time: None,
                })
                .collect();
            Self {
                page: LaunchPage {
                    content,
                    page: None,
                },
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        async fn calls(&self) -> Vec<Call> {
            self.calls.lock().await.clone()
        }

        async fn record(&self, call: Call) -> Result<()> {
            self.calls.lock().await.push(call);
            if self.fail {
                return Err(RpError::ServiceError {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LaunchService for MockService {
        async fn get_launches(&self) -> Result<LaunchPage> {
            self.record(Call::Launches).await?;
            Ok(self.page.clone())
        }

        async fn get_launches_by_filter_string(&self, filter: &str) -> Result<LaunchPage> {
            self.record(Call::ByFilterString(filter.to_string())).await?;
            Ok(self.page.clone())
        }

        async fn get_launches_by_filter_name(&self, name: &str) -> Result<LaunchPage> {
            self.record(Call::ByFilterName(name.to_string())).await?;
            Ok(self.page.clone())
        }

        async fn merge_launches(&self, request: &MergeRequest) -> Result<LaunchResource> {
            self.record(Call::Merge(request.clone())).await?;
            Ok(LaunchResource {
                id: "merged-1".to_string(),
            })
        }
    }

    fn merge_args(ids: &[&str], filter: Option<&str>) -> MergeArgs {
        MergeArgs {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            filter: filter.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_launch_filter_precedence() {
        let filters = vec!["status:FAILED".to_string(), "mode:DEFAULT".to_string()];
        assert_eq!(
            LaunchFilter::from_args(&filters, Some("nightly")),
            LaunchFilter::Raw("status:FAILED&mode:DEFAULT".to_string())
        );
        assert_eq!(
            LaunchFilter::from_args(&[], Some("nightly")),
            LaunchFilter::Named("nightly".to_string())
        );
        assert_eq!(LaunchFilter::from_args(&[], Some("")), LaunchFilter::None);
        assert_eq!(LaunchFilter::from_args(&[], None), LaunchFilter::None);
    }

    #[tokio::test]
    async fn test_list_joins_raw_filters_and_calls_once() {
        let service = MockService::with_launches(&["a"]);
        let args = ListArgs {
            filters: vec!["status:FAILED".to_string(), "mode:DEFAULT".to_string()],
            filter_name: Some("ignored".to_string()),
        };
        let mut out = Vec::new();

        list_launches(&service, &args, &mut out).await.unwrap();

        assert_eq!(
            service.calls().await,
            vec![Call::ByFilterString("status:FAILED&mode:DEFAULT".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_without_filters_uses_default_page() {
        let service = MockService::with_launches(&["a", "b"]);
        let mut out = Vec::new();

        list_launches(&service, &ListArgs::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(service.calls().await, vec![Call::Launches]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a #1 \"launch 1\"\nb #2 \"launch 2\"\n"
        );
    }

    #[tokio::test]
    async fn test_list_by_filter_name() {
        let service = MockService::with_launches(&[]);
        let args = ListArgs {
            filter_name: Some("nightly".to_string()),
            filters: vec![],
        };
        let mut out = Vec::new();

        list_launches(&service, &args, &mut out).await.unwrap();

        assert_eq!(
            service.calls().await,
            vec![Call::ByFilterName("nightly".to_string())]
        );
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_list_propagates_service_error() {
        let service = MockService::failing();
        let mut out = Vec::new();

        let result = list_launches(&service, &ListArgs::default(), &mut out).await;

        assert!(matches!(result, Err(RpError::ServiceError { status: 500, .. })));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_merge_ids_explicit_take_precedence() {
        let service = MockService::with_launches(&["x"]);
        let args = merge_args(&["L2", "L1"], Some("nightly"));

        let ids = get_merge_ids(&service, &args).await.unwrap();

        assert_eq!(ids, vec!["L2", "L1"]);
        assert!(service.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_merge_ids_from_named_filter_in_service_order() {
        let service = MockService::with_launches(&["c", "a", "b"]);
        let args = merge_args(&[], Some("nightly"));

        let ids = get_merge_ids(&service, &args).await.unwrap();

        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(
            service.calls().await,
            vec![Call::ByFilterName("nightly".to_string())]
        );
    }

    #[tokio::test]
    async fn test_merge_ids_missing_input() {
        let service = MockService::with_launches(&["x"]);

        let result = get_merge_ids(&service, &merge_args(&[], None)).await;
        assert!(matches!(result, Err(RpError::MissingInput)));

        let result = get_merge_ids(&service, &merge_args(&[], Some(""))).await;
        assert!(matches!(result, Err(RpError::MissingInput)));

        assert!(service.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_merge_fails_before_any_call_without_input() {
        let service = MockService::default();
        let mut out = Vec::new();

        let err = merge_launches(&service, &merge_args(&[], None), &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no either IDs or filter provided");
        assert!(service.calls().await.is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_merge_with_explicit_ids() {
        let service = MockService::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut out = Vec::new();

        merge_launches_at(&service, &merge_args(&["L1", "L2"], None), now, &mut out)
            .await
            .unwrap();

        let calls = service.calls().await;
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Merge(request) => {
                assert_eq!(request.launches, vec!["L1", "L2"]);
                assert_eq!(request.merge_type.as_str(), "DEEP");
                assert_eq!(request.name, "");
                assert_eq!(request.start_time, now - Duration::hours(10));
                assert_eq!(request.end_time, now - Duration::minutes(1));
            }
            other => panic!("unexpected call: {:?}", other),
        }
        assert_eq!(String::from_utf8(out).unwrap(), "merged-1\n");
    }

    #[tokio::test]
    async fn test_merge_by_filter_makes_two_sequential_calls() {
        let service = MockService::with_launches(&["a", "b"]);
        let args = MergeArgs {
            filter: Some("nightly".to_string()),
            name: "merged nightly".to_string(),
            merge_type: "BASIC".to_string(),
            ids: vec![],
        };
        let mut out = Vec::new();

        merge_launches(&service, &args, &mut out).await.unwrap();

        let calls = service.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::ByFilterName("nightly".to_string()));
        match &calls[1] {
            Call::Merge(request) => {
                assert_eq!(request.launches, vec!["a", "b"]);
                assert_eq!(request.name, "merged nightly");
                assert_eq!(request.merge_type.as_str(), "BASIC");
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn test_build_merge_request_defaults_empty_type_to_deep() {
        let args = MergeArgs {
            merge_type: String::new(),
            ..Default::default()
        };
        let request = build_merge_request(&args, vec!["L1".to_string()], Utc::now());
        assert_eq!(request.merge_type, MergeType::default());
    }
}
