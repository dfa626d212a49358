//! Chart data providers
//!
//! The view asks a provider for the points behind each visualization. The
//! canned classifier is the default; the service-backed provider asks the
//! dashboard service and falls back to the classifier when it can't answer.

use async_trait::async_trait;
use std::sync::Arc;

use super::classifier::{classify, ChartPoint};
use crate::client::{ChartConfig, ChartDataRequest, ChartDataResponse, HttpDashboardClient};
use crate::models::Visualization;

/// Source of the data points drawn for a visualization
#[async_trait]
pub trait ChartDataProvider: Send + Sync {
    async fn chart_data(&self, viz: &Visualization) -> Vec<ChartPoint>;
}

/// Canned data picked by [`classify`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockChartData;

#[async_trait]
impl ChartDataProvider for MockChartData {
    async fn chart_data(&self, viz: &Visualization) -> Vec<ChartPoint> {
        classify(viz.kind, &viz.title)
    }
}

/// Data from the service's chart-data endpoint
pub struct ServiceChartData {
    client: Arc<HttpDashboardClient>,
}

impl ServiceChartData {
    pub fn new(client: Arc<HttpDashboardClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChartDataProvider for ServiceChartData {
    async fn chart_data(&self, viz: &Visualization) -> Vec<ChartPoint> {
        let request = ChartDataRequest {
            chart_config: ChartConfig {
                kind: viz.kind,
                title: viz.title.clone(),
                fields: viz.fields.clone().unwrap_or_default(),
            },
        };

        match self.client.generate_chart_data(&request).await {
            Ok(response) => {
                let points = points_from_response(&response);
                if points.is_empty() {
                    tracing::debug!(title = %viz.title, "Service sent no chart data, using canned data");
                    classify(viz.kind, &viz.title)
                } else {
                    points
                }
            }
            Err(e) => {
                tracing::warn!(title = %viz.title, error = %e, "Chart data request failed, using canned data");
                classify(viz.kind, &viz.title)
            }
        }
    }
}

/// Pair labels with the first dataset's values
fn points_from_response(response: &ChartDataResponse) -> Vec<ChartPoint> {
    let Some(dataset) = response.datasets.first() else {
        return Vec::new();
    };

    response
        .labels
        .iter()
        .zip(dataset.data.iter())
        .map(|(label, value)| ChartPoint::new(label.clone(), *value))
        .collect()
}
