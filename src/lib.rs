//! # Dashboard Agent
//!
//! Conversational HR-analytics dashboards - a client that sends prompts to a
//! dashboard-generation service and keeps the resulting chat sessions,
//! dashboards and chart data ready to draw.
//!
//! ## Features
//!
//! - **Bounded sessions**: the three most recent conversations, newest first
//! - **One round trip per turn**: prompt plus history out, text and dashboard back
//! - **Canned chart data**: deterministic datasets picked from a chart's type and title
//! - **Observable state**: every change is published as an [`AppState`] snapshot
//!
//! ## Modules
//!
//! - [`store`]: Session list and active-session pointer
//! - [`conversation`]: One conversation turn against the service
//! - [`charts`]: Chart data classifier and providers
//! - [`client`]: HTTP client for the dashboard service
//! - [`view`]: Plain-text rendering of snapshots
//! - [`agent`]: Façade wiring the above together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashboard_agent::{Config, DashboardAgent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = DashboardAgent::from_config(&Config::default())?;
//!
//!     // Start a session and wait for the assistant's dashboard
//!     if let Some((id, outcome)) = agent.create_session("Create an attrition dashboard").await {
//!         println!("Session {} ended with {:?}", id, outcome);
//!     }
//!
//!     for series in agent.active_charts().await {
//!         println!("{}", dashboard_agent::view::render_chart(&series));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod charts;
pub mod client;
pub mod config;
pub mod conversation;
pub mod models;
pub mod store;
pub mod view;

// Re-export top-level types for convenience
pub use agent::DashboardAgent;

pub use charts::{classify, ChartDataProvider, ChartPoint, ChartSeries, MockChartData, ServiceChartData};

pub use client::{ClientConfig, ClientError, DashboardApi, HttpDashboardClient};

pub use config::{ChartSource, Config, ConfigError, LoggingConfig};

pub use conversation::{ConversationController, SendOutcome, ERROR_REPLY};

pub use models::{
    ChatSession, Dashboard, DashboardMetric, HistoryEntry, Message, Role, SessionId,
    Visualization, VizType,
};

pub use store::{AppState, Screen, SessionStore, StoreConfig, StoreError, StoreResult};
