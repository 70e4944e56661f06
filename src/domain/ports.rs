use crate::domain::model::{LaunchPage, LaunchResource, MergeRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The four launch operations the reporting service exposes to this tool.
#[async_trait]
pub trait LaunchService: Send + Sync {
    async fn get_launches(&self) -> Result<LaunchPage>;
    async fn get_launches_by_filter_string(&self, filter: &str) -> Result<LaunchPage>;
    async fn get_launches_by_filter_name(&self, name: &str) -> Result<LaunchPage>;
    async fn merge_launches(&self, request: &MergeRequest) -> Result<LaunchResource>;
}

pub trait ConnectionProvider: Send + Sync {
    fn host(&self) -> &str;
    fn project(&self) -> &str;
    fn uuid(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
