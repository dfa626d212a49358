//! Dashboard service REST client
//!
//! HTTP client for the assistant service that turns prompts into dashboard
//! descriptions.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::dto::{
    ChartDataRequest, ChartDataResponse, ChatReply, ChatRequest, HealthResponse, TrendsRequest,
    TrendsResponse,
};
use super::error::ClientError;
use super::DashboardApi;

/// Configuration for the dashboard service client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Per-request timeout; `None` waits as long as the service takes
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: None,
        }
    }
}

/// Dashboard service REST client
pub struct HttpDashboardClient {
    client: Client,
    config: ClientConfig,
}

impl HttpDashboardClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Check that the service is up
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response).await
    }

    /// Ask the service for industry benchmarks on a topic
    pub async fn search_trends(
        &self,
        topic: &str,
        industry: &str,
    ) -> Result<TrendsResponse, ClientError> {
        let body = TrendsRequest {
            topic: topic.to_string(),
            industry: industry.to_string(),
        };

        self.post_json("/api/search-trends", &body).await
    }

    /// Ask the service for data points behind one chart
    pub async fn generate_chart_data(
        &self,
        request: &ChartDataRequest,
    ) -> Result<ChartDataResponse, ClientError> {
        self.post_json("/api/generate-chart-data", request).await
    }

    /// Single-attempt JSON POST
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response).await
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        tracing::debug!(
            history_len = request.history.len(),
            "Sending chat request"
        );
        self.post_json("/api/chat", request).await
    }
}

/// Turn a response into `T`, treating any non-2xx status as an error
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    let bytes = response.bytes().await.map_err(ClientError::from_send)?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
