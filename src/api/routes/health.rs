//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Reports "stale" when the aggregate refresh has fallen behind.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let last_refresh = state.dashboard.last_aggregate_refresh().await;
    let age = (Utc::now() - last_refresh).to_std().unwrap_or_default();
    let status = if age > state.stale_after { "stale" } else { "healthy" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        ws_connections: state.ws_connection_count().await,
        last_aggregate_refresh: last_refresh,
    })
}
