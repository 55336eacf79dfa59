//! Order Routes
//!
//! - GET /orders - The full order catalog

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::OrdersResponse;
use crate::api::state::AppState;

/// GET /orders
pub async fn list_orders(State(state): State<Arc<AppState>>) -> Json<OrdersResponse> {
    let orders = state.dashboard.orders.as_ref().clone();

    Json(OrdersResponse {
        total: orders.len(),
        orders,
    })
}
