//! Dashboard Service Client
//!
//! The assistant service is an external collaborator: we send it the user's
//! message plus the conversation so far and get back text and, usually, a
//! dashboard description.
//!
//! ## Endpoints
//!
//! - `POST /api/chat`: the conversation turn ([`DashboardApi`])
//! - `GET /health`: liveness check
//! - `POST /api/search-trends`: industry benchmarks for a topic
//! - `POST /api/generate-chart-data`: data points behind one chart

mod dto;
mod error;
mod http;

use async_trait::async_trait;

pub use dto::{
    ChartConfig, ChartDataRequest, ChartDataResponse, ChartDataset, ChatReply, ChatRequest,
    HealthResponse, TrendsRequest, TrendsResponse,
};
pub use error::ClientError;
pub use http::{ClientConfig, HttpDashboardClient};

/// The conversation endpoint of the dashboard service.
///
/// One call is one round trip; implementations do not retry.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;
}
