use crate::domain::model::{LaunchPage, LaunchResource, MergeRequest, UserFilterPage};
use crate::domain::ports::{ConnectionProvider, LaunchService};
use crate::utils::error::{Result, RpError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// ReportPortal API v1 client. Every request is authenticated with the
/// project's UUID as a bearer token.
#[derive(Debug, Clone)]
pub struct RpClient {
    client: Client,
    base_url: Url,
    project: String,
    uuid: String,
}

impl RpClient {
    pub fn new<C: ConnectionProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(config.host())?,
            project: config.project().to_string(),
            uuid: config.uuid().to_string(),
        })
    }

    /// `{host}/api/v1/{project}/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RpError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v1", self.project.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.uuid).send().await?;
        tracing::debug!("📡 API response status: {}", response.status());
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!("API request failed with status {}: {}", status, message);
        Err(RpError::ServiceError {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_launch_page(&self, url: Url) -> Result<LaunchPage> {
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }
}

#[async_trait]
impl LaunchService for RpClient {
    async fn get_launches(&self) -> Result<LaunchPage> {
        let url = self.endpoint(&["launch"])?;
        self.get_launch_page(url).await
    }

    async fn get_launches_by_filter_string(&self, filter: &str) -> Result<LaunchPage> {
        let mut url = self.endpoint(&["launch"])?;
        // 過濾字串原樣作為 query string
        url.set_query(Some(filter));
        self.get_launch_page(url).await
    }

    async fn get_launches_by_filter_name(&self, name: &str) -> Result<LaunchPage> {
        let mut filter_url = self.endpoint(&["filter"])?;
        filter_url
            .query_pairs_mut()
            .append_pair("filter.eq.name", name);

        tracing::debug!("GET {}", filter_url);
        let filters: UserFilterPage = self.send(self.client.get(filter_url)).await?;
        let filter = filters
            .content
            .into_iter()
            .next()
            .ok_or_else(|| RpError::FilterNotFound {
                name: name.to_string(),
            })?;

        let mut url = self.endpoint(&["launch"])?;
        let params = filter.to_query_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        self.get_launch_page(url).await
    }

    async fn merge_launches(&self, request: &MergeRequest) -> Result<LaunchResource> {
        let url = self.endpoint(&["launch", "merge"])?;
        tracing::debug!(
            "POST {} ({} launches, type {})",
            url,
            request.launches.len(),
            request.merge_type
        );
        self.send(self.client.post(url).json(request)).await
    }
}
