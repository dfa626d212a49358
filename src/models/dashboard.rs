//! Dashboard payload types
//!
//! The dashboard description returned by the assistant service. It is consumed
//! structurally: every section except the title is optional, and the service
//! is free to add fields we do not render.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A dashboard description produced by the assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub key_insights: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::items", skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<DashboardMetric>>,
    #[serde(default, deserialize_with = "lenient::items", skip_serializing_if = "Option::is_none")]
    pub visualizations: Option<Vec<Visualization>>,
    /// Source fields the assistant based the dashboard on
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub fields_used: Option<Vec<String>>,
    /// Suggested follow-up analyses
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl Dashboard {
    /// Create a dashboard with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            key_insights: None,
            metrics: None,
            visualizations: None,
            fields_used: None,
            recommendations: None,
        }
    }

    /// Builder method: set subtitle
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Builder method: add a key insight
    pub fn insight(mut self, insight: impl Into<String>) -> Self {
        self.key_insights
            .get_or_insert_with(Vec::new)
            .push(insight.into());
        self
    }

    /// Builder method: add a metric card
    pub fn metric(mut self, metric: DashboardMetric) -> Self {
        self.metrics.get_or_insert_with(Vec::new).push(metric);
        self
    }

    /// Builder method: add a visualization
    pub fn visualization(mut self, viz: Visualization) -> Self {
        self.visualizations.get_or_insert_with(Vec::new).push(viz);
        self
    }

    /// Visualizations in display order (empty when none were sent)
    pub fn visualizations(&self) -> &[Visualization] {
        self.visualizations.as_deref().unwrap_or_default()
    }
}

/// A single headline number on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardMetric {
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: String,
    /// Either a string or a number, depending on the service
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl DashboardMetric {
    pub fn new(label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            insight: None,
            calculation: None,
            field: None,
        }
    }

    /// Builder method: set the explanatory insight
    pub fn insight(mut self, insight: impl Into<String>) -> Self {
        self.insight = Some(insight.into());
        self
    }

    /// Value as shown on a metric card.
    ///
    /// Missing, null, empty, zero and `false` values all show as `N/A`.
    pub fn display_value(&self) -> String {
        use serde_json::Value;

        match &self.value {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) if n.as_f64().map_or(true, |v| v != 0.0) => n.to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Array(_) | Value::Object(_) => self.value.to_string(),
            _ => "N/A".to_string(),
        }
    }
}

/// Declared chart type of a visualization
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VizType {
    Bar,
    Line,
    Pie,
    Donut,
    /// Any chart type we don't know how to draw, or none given
    #[default]
    #[serde(other)]
    Unknown,
}

impl VizType {
    /// Pie and donut charts share data and rendering
    pub fn is_circular(&self) -> bool {
        matches!(self, VizType::Pie | VizType::Donut)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VizType::Bar => "bar",
            VizType::Line => "line",
            VizType::Pie => "pie",
            VizType::Donut => "donut",
            VizType::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for VizType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(VizType::Bar),
            "line" => Ok(VizType::Line),
            "pie" => Ok(VizType::Pie),
            "donut" => Ok(VizType::Donut),
            other => Err(format!(
                "Unknown chart type: {}. Use: bar, line, pie, donut",
                other
            )),
        }
    }
}

impl std::fmt::Display for VizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chart descriptor within a dashboard. Carries no data points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visualization {
    #[serde(rename = "type", default)]
    pub kind: VizType,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl Visualization {
    pub fn new(kind: VizType, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: String::new(),
            x_axis: None,
            y_axis: None,
            fields: None,
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
