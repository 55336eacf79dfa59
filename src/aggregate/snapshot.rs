//! Aggregate Snapshot Types
//!
//! What one aggregation pass produces. A snapshot is replaced wholesale on
//! every refresh and never updated in place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary totals over an order set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    /// Rounded to cents
    pub total_revenue: Decimal,
    pub total_customers: usize,
    /// Estimated product count (80% of orders)
    pub total_products: usize,
}

/// Derived performance indicators
///
/// Percentages are clamped to fixed ranges; scores are unbounded above but
/// never fall below their base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub data_quality: f64,
    pub processing_efficiency: f64,
    pub system_uptime: f64,
    pub pipeline_health: f64,
    pub business_impact: u64,
    pub cost_efficiency: u64,
    pub innovation_score: u64,
    pub throughput: u64,
    /// Milliseconds
    pub latency: u64,
    pub error_rate: f64,
    pub data_velocity: u64,
}

impl PerformanceMetrics {
    /// Flatten into a name → value mapping
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("data_quality", self.data_quality),
            ("processing_efficiency", self.processing_efficiency),
            ("system_uptime", self.system_uptime),
            ("pipeline_health", self.pipeline_health),
            ("business_impact", self.business_impact as f64),
            ("cost_efficiency", self.cost_efficiency as f64),
            ("innovation_score", self.innovation_score as f64),
            ("throughput", self.throughput as f64),
            ("latency", self.latency as f64),
            ("error_rate", self.error_rate),
            ("data_velocity", self.data_velocity as f64),
        ])
    }
}

/// A computed summary of the order set plus synthetic indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub summary: OrderSummary,
    pub performance: PerformanceMetrics,
    pub generated_at: DateTime<Utc>,
}
