//! Data model
//!
//! Sessions, messages and the dashboard payload exchanged with the
//! assistant service.

mod dashboard;
pub(crate) mod lenient;
mod session;

pub use dashboard::{Dashboard, DashboardMetric, Visualization, VizType};
pub use session::{
    session_title, ChatSession, HistoryEntry, Message, Role, SessionId, DEFAULT_TITLE,
    TITLE_MAX_CHARS,
};
