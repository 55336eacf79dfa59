//! Aggregation
//!
//! Summarizes an order list into an [`AggregateSnapshot`]: totals (count,
//! revenue, distinct customers) plus derived performance indicators.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tally::aggregate::{Aggregator, FixedSource};
//! use tally::orders::sample_orders;
//!
//! let aggregator = Aggregator::new(Arc::new(FixedSource::new(0.5)));
//! let snapshot = aggregator.aggregate(&sample_orders());
//!
//! assert_eq!(snapshot.summary.total_orders, 50);
//! assert_eq!(snapshot.summary.total_customers, 50);
//! ```

mod aggregator;
mod snapshot;
mod source;

pub use aggregator::{
    summarize, Aggregator, DATA_QUALITY_RANGE, PIPELINE_HEALTH_RANGE,
    PROCESSING_EFFICIENCY_RANGE, SYSTEM_UPTIME_RANGE,
};
pub use snapshot::{AggregateSnapshot, OrderSummary, PerformanceMetrics};
pub use source::{FixedSource, MetricsSource, RandomSource, SeededSource, MAX_UNIT};
