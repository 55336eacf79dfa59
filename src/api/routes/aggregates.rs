//! Aggregate Routes
//!
//! - GET /aggregates - Latest aggregate snapshot
//!
//! Serves whatever the refresh loop last produced; requests never trigger
//! an aggregation themselves.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::AggregatesResponse;
use crate::api::state::AppState;

/// GET /aggregates
pub async fn get_aggregates(State(state): State<Arc<AppState>>) -> Json<AggregatesResponse> {
    let stamped = state.dashboard.aggregates.get().await;

    Json(AggregatesResponse {
        snapshot: stamped.value,
        revision: stamped.revision,
    })
}
