//! Chart Data
//!
//! The service describes charts but sends no data points, so the points
//! come from a [`ChartDataProvider`]: the canned [`classify`] function by
//! default, or the service's chart-data endpoint.

mod classifier;
mod provider;

pub use classifier::{classify, ChartPoint};
pub use provider::{ChartDataProvider, MockChartData, ServiceChartData};

use crate::models::{Dashboard, Visualization};

/// A visualization together with the points to draw for it
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub visualization: Visualization,
    pub points: Vec<ChartPoint>,
}

/// Resolve data for every visualization on a dashboard, in display order
pub async fn resolve_series(
    provider: &dyn ChartDataProvider,
    dashboard: &Dashboard,
) -> Vec<ChartSeries> {
    let mut series = Vec::with_capacity(dashboard.visualizations().len());
    for viz in dashboard.visualizations() {
        series.push(ChartSeries {
            visualization: viz.clone(),
            points: provider.chart_data(viz).await,
        });
    }
    series
}
