//! Tally API Server
//!
//! Run with: cargo run --bin tally-api
//!
//! # Configuration
//!
//! Reads `config.toml` from the default search path (see [`Config::load_default`]).
//! Environment variables override it:
//! - `TALLY_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TALLY_API_PORT`: Port to listen on (default: 8000)
//! - `TALLY_LOG_LEVEL`, `TALLY_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter, wins over `TALLY_LOG_LEVEL`

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tally::aggregate::{Aggregator, MetricsSource, RandomSource};
use tally::api::{serve, AppState};
use tally::config::Config;
use tally::orders::sample_orders;
use tally::refresh::{DashboardState, RefreshScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = Config::load_default();
    tally::logging::init(&loaded.config.logging).context("Failed to initialize logging")?;
    loaded.log();
    let config = loaded.config;

    tracing::info!("Starting Tally API server v{}", env!("CARGO_PKG_VERSION"));

    let source: Arc<dyn MetricsSource> = Arc::new(RandomSource);
    let aggregator = Aggregator::new(Arc::clone(&source));

    let orders = sample_orders();
    tracing::info!(orders = orders.len(), "Loaded order catalog");
    let dashboard = Arc::new(DashboardState::new(orders, &aggregator, source.as_ref()));

    let state = AppState::new(Arc::clone(&dashboard), config.api.clone())
        .with_aggregate_period(Duration::from_millis(config.refresh.aggregates_ms));

    let scheduler = RefreshScheduler::start(
        dashboard,
        aggregator,
        source,
        Some(Arc::clone(&state.ws_hub)),
        &config.refresh,
    );

    tracing::info!("Starting server on {}", config.api.addr());
    let result = serve(state, &config.api).await;

    scheduler.stop();
    result.context("API server failed")?;

    tracing::info!("Tally API server stopped");
    Ok(())
}
