//! Text renderers
//!
//! Each function turns part of a state snapshot into plain text. Nothing
//! here touches the store.

use crate::charts::{ChartPoint, ChartSeries};
use crate::models::{ChatSession, Dashboard, Role, VizType};
use crate::store::{AppState, Screen};

use super::suggestions::{DATA_FIELDS, SUGGESTIONS};

pub const INPUT_HINT: &str = "Ask to modify the dashboard or create a new one...";
pub const WAITING_INDICATOR: &str = "Generating dashboard...";

const BAR_WIDTH: usize = 30;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draw whichever screen the state calls for.
///
/// `series` holds the chart data for the active session's dashboard.
pub fn render_screen(state: &AppState, series: &[ChartSeries]) -> String {
    match state.screen() {
        Screen::Landing => render_landing(),
        Screen::Suggestions => render_suggestions(),
        Screen::Conversation => {
            let Some(session) = state.active_session() else {
                return render_suggestions();
            };
            let mut out = String::new();
            if let Some(dashboard) = &session.dashboard {
                out.push_str(&render_dashboard(dashboard, series));
                out.push('\n');
            }
            out.push_str(&render_messages(session));
            if state.awaiting_response() {
                out.push_str(WAITING_INDICATOR);
                out.push('\n');
            }
            let input = if state.input.is_empty() {
                INPUT_HINT
            } else {
                state.input.as_str()
            };
            out.push_str(&format!("\n> {}\n", input));
            out
        }
    }
}

pub fn render_landing() -> String {
    let mut out = String::from("HR Analytics Hub\n");
    out.push_str("Generate insightful dashboards from your employee data\n\n");
    out.push_str(&suggestion_grid());
    out.push_str("\nAvailable Data Fields:\n");
    for field in DATA_FIELDS {
        out.push_str(&format!("  - {}\n", field));
    }
    out.push_str("\nSelect a suggestion or type your own query\n");
    out
}

pub fn render_suggestions() -> String {
    let mut out = String::from("What would you like to explore?\n\n");
    out.push_str(&suggestion_grid());
    out
}

fn suggestion_grid() -> String {
    SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  [{}] {}\n      {}\n", i + 1, s.title, s.prompt))
        .collect()
}

/// Session list, newest first, with the active one marked
pub fn render_sidebar(state: &AppState) -> String {
    if state.sessions.is_empty() {
        return "No dashboards yet\n".to_string();
    }

    state
        .sessions
        .iter()
        .enumerate()
        .map(|(i, session)| {
            let marker = if state.active == Some(session.id) { '*' } else { ' ' };
            format!("{} {}. {}\n", marker, i + 1, session.title)
        })
        .collect()
}

/// Dashboard panel: header, insights, metric cards and charts
pub fn render_dashboard(dashboard: &Dashboard, series: &[ChartSeries]) -> String {
    let mut out = String::new();
    if !dashboard.title.is_empty() {
        out.push_str(&format!("{}\n", dashboard.title));
        out.push_str(&"=".repeat(dashboard.title.chars().count()));
        out.push('\n');
    }
    if let Some(subtitle) = &dashboard.subtitle {
        out.push_str(&format!("{}\n", subtitle));
    }

    if let Some(insights) = &dashboard.key_insights {
        out.push_str("\nKey Insights\n");
        for insight in insights {
            out.push_str(&format!("  • {}\n", insight));
        }
    }

    if let Some(metrics) = &dashboard.metrics {
        out.push('\n');
        for metric in metrics {
            out.push_str(&format!("  [{}] {}\n", metric.label, metric.display_value()));
            if let Some(insight) = &metric.insight {
                out.push_str(&format!("      {}\n", insight));
            }
        }
    }

    for s in series {
        out.push('\n');
        out.push_str(&render_chart(s));
    }

    if let Some(recommendations) = &dashboard.recommendations {
        out.push_str("\nRecommendations\n");
        for rec in recommendations {
            out.push_str(&format!("  - {}\n", rec));
        }
    }

    out
}

/// One visualization with its data
pub fn render_chart(series: &ChartSeries) -> String {
    let viz = &series.visualization;
    let mut out = format!("{} ({})\n", viz.title, viz.kind);
    if !viz.description.is_empty() {
        out.push_str(&format!("{}\n", viz.description));
    }

    let body = match viz.kind {
        VizType::Bar => bar_chart(&series.points),
        VizType::Line => sparkline(&series.points),
        VizType::Pie | VizType::Donut => breakdown(&series.points),
        VizType::Unknown => String::new(),
    };
    out.push_str(&body);
    out
}

fn label_width(points: &[ChartPoint]) -> usize {
    points.iter().map(|p| p.name.chars().count()).max().unwrap_or(0)
}

fn bar_chart(points: &[ChartPoint]) -> String {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let width = label_width(points);

    points
        .iter()
        .map(|p| {
            let len = if max > 0.0 {
                ((p.value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!("  {:<width$} {} {}\n", p.name, "█".repeat(len), p.value, width = width)
        })
        .collect()
}

fn sparkline(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return String::new();
    }

    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let line: String = points
        .iter()
        .map(|p| {
            let level = if span > 0.0 {
                (((p.value - min) / span) * (SPARKS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARKS[level.min(SPARKS.len() - 1)]
        })
        .collect();

    let first = &points[0];
    let last = &points[points.len() - 1];
    format!(
        "  {}  {} {} .. {} {}\n",
        line, first.name, first.value, last.name, last.value
    )
}

fn breakdown(points: &[ChartPoint]) -> String {
    let total: f64 = points.iter().map(|p| p.value).sum();
    let width = label_width(points);

    points
        .iter()
        .map(|p| {
            let percent = if total > 0.0 { p.value / total * 100.0 } else { 0.0 };
            format!("  {:<width$} {:.0}%\n", p.name, percent, width = width)
        })
        .collect()
}

/// Conversation log, one line per message
pub fn render_messages(session: &ChatSession) -> String {
    session
        .messages
        .iter()
        .map(|m| match m.role {
            Role::User => format!("you: {}\n", m.content),
            Role::Assistant => format!("assistant: {}\n", m.content),
        })
        .collect()
}
