//! Tally headless runner
//!
//! Runs the refresh loop without the HTTP server and logs every slice update
//! until Ctrl+C.

use anyhow::Context;
use std::sync::Arc;
use tally::aggregate::{Aggregator, MetricsSource, RandomSource};
use tally::config::Config;
use tally::orders::sample_orders;
use tally::refresh::{DashboardState, RefreshScheduler};
use tally::websocket::{ConnectionHub, HubConfig, WsEvent};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = Config::load_default();
    tally::logging::init(&loaded.config.logging).context("Failed to initialize logging")?;
    loaded.log();
    let config = loaded.config;

    tracing::info!("Tally v{}", env!("CARGO_PKG_VERSION"));

    let source: Arc<dyn MetricsSource> = Arc::new(RandomSource);
    let aggregator = Aggregator::new(Arc::clone(&source));
    let state = Arc::new(DashboardState::new(
        sample_orders(),
        &aggregator,
        source.as_ref(),
    ));

    let initial = state.aggregates.value().await;
    tracing::info!(
        orders = initial.summary.total_orders,
        revenue = %initial.summary.total_revenue,
        customers = initial.summary.total_customers,
        "Initial aggregates"
    );

    let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
    let mut events = hub.subscribe_broadcast();

    let scheduler = RefreshScheduler::start(
        Arc::clone(&state),
        aggregator,
        source,
        Some(Arc::clone(&hub)),
        &config.refresh,
    );
    hub.publish(WsEvent::system("Refresh loop started")).await;

    let shutdown = tally::api::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            event = events.recv() => match event {
                Ok(event) => event.log(),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event log fell behind");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    scheduler.stop();
    tracing::info!("Tally shutdown complete");
    Ok(())
}
