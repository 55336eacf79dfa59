//! # Tally
//!
//! Sales dashboard backend: aggregates a fixed order catalog into summary
//! totals and performance indicators, and keeps a set of display slices
//! fresh on independent timers.
//!
//! ## Features
//!
//! - **Aggregation**: exact decimal revenue, clamped performance scores
//! - **Refresh loop**: 1s clock, 3s KPIs, 5s pipeline, 10s engineering, 15s aggregates
//! - **Real-time**: WebSocket streaming of every slice update
//! - **REST API**: Axum server with a typed reqwest client and CLI
//!
//! ## Modules
//!
//! - [`orders`]: Order type and the built-in catalog
//! - [`aggregate`]: The aggregator and its random source seam
//! - [`telemetry`]: KPI, pipeline and engineering samplers
//! - [`refresh`]: Dashboard state and the refresh scheduler
//! - [`api`]: REST API server with Axum
//! - [`client`]: HTTP client for the API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tally::aggregate::{Aggregator, MetricsSource, RandomSource};
//! use tally::orders::sample_orders;
//! use tally::refresh::{DashboardState, RefreshConfig, RefreshScheduler};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source: Arc<dyn MetricsSource> = Arc::new(RandomSource);
//!     let aggregator = Aggregator::new(Arc::clone(&source));
//!     let state = Arc::new(DashboardState::new(sample_orders(), &aggregator, source.as_ref()));
//!
//!     let scheduler = RefreshScheduler::start(
//!         Arc::clone(&state),
//!         aggregator,
//!         source,
//!         None,
//!         &RefreshConfig::default(),
//!     );
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(4)).await;
//!     println!("KPI revision: {}", state.kpi.get().await.revision);
//!
//!     scheduler.stop();
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod client;
pub mod config;
pub mod display;
pub mod logging;
pub mod orders;
pub mod refresh;
pub mod telemetry;
pub mod websocket;

// Re-export top-level types for convenience
pub use aggregate::{AggregateSnapshot, Aggregator, MetricsSource, OrderSummary, PerformanceMetrics};

pub use orders::{sample_orders, Order};

pub use refresh::{DashboardState, RefreshConfig, RefreshKind, RefreshScheduler};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use client::{ClientConfig, ClientError, DashboardClient, Environment};

pub use config::{Config, ConfigError};

pub use websocket::{ConnectionHub, HubConfig, WsEvent};
