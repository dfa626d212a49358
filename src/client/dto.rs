//! Request/response bodies of the dashboard service

use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::{Dashboard, HistoryEntry, VizType};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, excluding `message`
    pub history: Vec<HistoryEntry>,
}

/// Successful reply of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    /// Assistant text; a body without it is not a valid reply, but null
    /// reads as empty
    #[serde(deserialize_with = "lenient::text")]
    pub response: String,
    /// A dashboard that can't be read at all counts as none
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub dashboard: Option<Dashboard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Reply of `GET /health`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of `POST /api/search-trends`
#[derive(Debug, Clone, Serialize)]
pub struct TrendsRequest {
    pub topic: String,
    pub industry: String,
}

/// Reply of `POST /api/search-trends`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrendsResponse {
    pub trends: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /api/generate-chart-data`
#[derive(Debug, Clone, Serialize)]
pub struct ChartDataRequest {
    pub chart_config: ChartConfig,
}

/// The chart being asked about
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: VizType,
    pub title: String,
    pub fields: Vec<String>,
}

/// Reply of `POST /api/generate-chart-data`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartDataResponse {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartDataset {
    #[serde(default)]
    pub label: Option<String>,
    pub data: Vec<f64>,
}
