//! Dashboard Routes
//!
//! - GET /dashboard-metrics - KPI panel, gauges, engineering metrics
//! - GET /real-time-data - Clock, pipeline chart, real-time series

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DashboardMetricsResponse, RealTimeDataResponse};
use crate::api::state::AppState;

/// GET /dashboard-metrics
pub async fn dashboard_metrics(
    State(state): State<Arc<AppState>>,
) -> Json<DashboardMetricsResponse> {
    let dashboard = &state.dashboard;
    let kpi = dashboard.kpi.get().await;
    let pipeline = dashboard.pipeline.value().await;
    let engineering = dashboard.engineering.value().await;

    Json(DashboardMetricsResponse {
        display: kpi.value.display(),
        kpi: kpi.value,
        gauges: pipeline.gauges,
        engineering: engineering.metrics,
        kpi_updated_at: kpi.updated_at,
    })
}

/// GET /real-time-data
pub async fn real_time_data(State(state): State<Arc<AppState>>) -> Json<RealTimeDataResponse> {
    let dashboard = &state.dashboard;

    Json(RealTimeDataResponse {
        now: dashboard.clock.value().await,
        pipeline: dashboard.pipeline.value().await,
        series: dashboard.engineering.value().await.series,
    })
}
