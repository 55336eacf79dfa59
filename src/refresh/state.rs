//! Dashboard State
//!
//! The shared display state, split into independent slices. Each refresh
//! timer owns exactly one slice and replaces it wholesale, so slices never
//! need to be locked together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::aggregate::{AggregateSnapshot, Aggregator, MetricsSource};
use crate::orders::Order;
use crate::telemetry::{EngineeringMetrics, KpiPanel, PipelineChart, RealTimeSeries};

/// A value together with its replacement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    pub value: T,
    /// Number of replacements since startup
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

/// One independently replaced piece of display state
pub struct Slice<T> {
    inner: RwLock<Stamped<T>>,
}

impl<T: Clone> Slice<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Stamped {
                value,
                revision: 0,
                updated_at: Utc::now(),
            }),
        }
    }

    /// Copy of the current value and its stamp
    pub async fn get(&self) -> Stamped<T> {
        self.inner.read().await.clone()
    }

    /// Current value only
    pub async fn value(&self) -> T {
        self.inner.read().await.value.clone()
    }

    /// Replace the value, last write wins. Returns the new revision.
    pub async fn replace(&self, value: T) -> u64 {
        let mut guard = self.inner.write().await;
        guard.value = value;
        guard.revision += 1;
        guard.updated_at = Utc::now();
        guard.revision
    }
}

/// Engineering metrics plus their history lines, refreshed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringPanel {
    pub metrics: EngineeringMetrics,
    pub series: RealTimeSeries,
}

impl EngineeringPanel {
    pub fn sample(source: &dyn MetricsSource) -> Self {
        Self {
            metrics: EngineeringMetrics::sample(source),
            series: RealTimeSeries::sample(source),
        }
    }
}

/// Everything the presentation layer renders
pub struct DashboardState {
    /// Immutable order catalog
    pub orders: Arc<Vec<Order>>,
    pub clock: Slice<DateTime<Utc>>,
    pub kpi: Slice<KpiPanel>,
    pub pipeline: Slice<PipelineChart>,
    pub engineering: Slice<EngineeringPanel>,
    pub aggregates: Slice<AggregateSnapshot>,
}

impl DashboardState {
    /// Build the initial state. The aggregate slice is computed here so it
    /// is populated before any timer runs.
    pub fn new(orders: Vec<Order>, aggregator: &Aggregator, source: &dyn MetricsSource) -> Self {
        let snapshot = aggregator.aggregate(&orders);

        Self {
            orders: Arc::new(orders),
            clock: Slice::new(Utc::now()),
            kpi: Slice::new(KpiPanel::default()),
            pipeline: Slice::new(PipelineChart::default()),
            engineering: Slice::new(EngineeringPanel::sample(source)),
            aggregates: Slice::new(snapshot),
        }
    }

    /// When the aggregate slice was last replaced
    pub async fn last_aggregate_refresh(&self) -> DateTime<Utc> {
        self.aggregates.get().await.updated_at
    }
}
