//! Tally REST API
//!
//! HTTP API layer for the dashboard, built with Axum. Every endpoint reads
//! the current [`DashboardState`](crate::refresh::DashboardState); the
//! refresh scheduler is what keeps it moving.
//!
//! # Endpoints
//!
//! - `GET /orders` - Order catalog
//! - `GET /aggregates` - Latest aggregate snapshot
//! - `GET /dashboard-metrics` - KPI panel, gauges, engineering metrics
//! - `GET /real-time-data` - Clock, pipeline chart, real-time series
//! - `GET /health` - Full health status
//! - `GET /health/live` - Liveness probe
//! - `GET /ws` - Real-time streaming connection
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally::aggregate::{Aggregator, RandomSource};
//! use tally::api::{serve, ApiConfig, AppState};
//! use tally::orders::sample_orders;
//! use tally::refresh::DashboardState;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let aggregator = Aggregator::with_random();
//!     let dashboard = Arc::new(DashboardState::new(sample_orders(), &aggregator, &RandomSource));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dashboard, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(routes::orders::list_orders))
        .route("/aggregates", get(routes::aggregates::get_aggregates))
        .route("/dashboard-metrics", get(routes::dashboard::dashboard_metrics))
        .route("/real-time-data", get(routes::dashboard::real_time_data))
        .route("/health", get(routes::health::full_health))
        .route("/health/live", get(routes::health::liveness))
        .route("/ws", get(websocket_handler))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        // The dashboard is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Tally API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Tally API shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
