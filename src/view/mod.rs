//! View Renderer
//!
//! Plain-text presentation of state snapshots: landing screen, suggestion
//! grid, session list, dashboard panel, message log and input bar.

mod render;
mod suggestions;

pub use render::{
    render_chart, render_dashboard, render_landing, render_messages, render_screen,
    render_sidebar, render_suggestions, INPUT_HINT, WAITING_INDICATOR,
};
pub use suggestions::{suggestion, Suggestion, DATA_FIELDS, SUGGESTIONS};
