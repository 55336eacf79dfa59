//! Order Aggregator
//!
//! Turns an order list into an [`AggregateSnapshot`]. Totals depend only on
//! the input; uptime, latency and error rate are drawn from the injected
//! [`MetricsSource`].

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::snapshot::{AggregateSnapshot, OrderSummary, PerformanceMetrics};
use super::source::{MetricsSource, RandomSource};
use crate::display::round_dp;
use crate::orders::{distinct_customers, total_revenue, Order};

pub const DATA_QUALITY_RANGE: RangeInclusive<f64> = 80.0..=100.0;
pub const PROCESSING_EFFICIENCY_RANGE: RangeInclusive<f64> = 75.0..=100.0;
pub const SYSTEM_UPTIME_RANGE: RangeInclusive<f64> = 95.0..=100.0;

/// Midpoint of the data quality and processing efficiency floors
pub const PIPELINE_HEALTH_RANGE: RangeInclusive<f64> = 77.5..=100.0;

const BUSINESS_IMPACT_BASE: f64 = 80.0;
const COST_EFFICIENCY_BASE: f64 = 75.0;
const INNOVATION_SCORE_BASE: f64 = 70.0;

/// Computes snapshots from order lists
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn MetricsSource>,
}

impl Aggregator {
    /// Create an aggregator drawing random figures from `source`
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self { source }
    }

    /// Aggregator backed by system randomness
    pub fn with_random() -> Self {
        Self::new(Arc::new(RandomSource))
    }

    /// Aggregate an order list into a fresh snapshot
    pub fn aggregate(&self, orders: &[Order]) -> AggregateSnapshot {
        let summary = summarize(orders);
        let performance = self.performance(orders.len(), &summary);

        tracing::debug!(
            total_orders = summary.total_orders,
            total_revenue = %summary.total_revenue,
            data_quality = performance.data_quality,
            "Aggregated orders"
        );

        AggregateSnapshot {
            summary,
            performance,
            generated_at: Utc::now(),
        }
    }

    fn performance(&self, count: usize, summary: &OrderSummary) -> PerformanceMetrics {
        let n = count as f64;
        let revenue = summary.total_revenue.to_f64().unwrap_or(0.0);
        let avg_order_value = if count == 0 { 0.0 } else { revenue / n };

        let data_quality = clamp_to(85.0 + avg_order_value / 100.0, &DATA_QUALITY_RANGE);
        let processing_efficiency = clamp_to(80.0 + n / 100.0, &PROCESSING_EFFICIENCY_RANGE);
        let system_uptime = clamp_to(self.source.uniform(98.0, 2.0), &SYSTEM_UPTIME_RANGE);

        let customer_ratio = if count == 0 {
            0.0
        } else {
            summary.total_customers as f64 / n
        };

        PerformanceMetrics {
            data_quality: round_dp(data_quality, 1),
            processing_efficiency: round_dp(processing_efficiency, 1),
            system_uptime: round_dp(system_uptime, 1),
            pipeline_health: round_dp((data_quality + processing_efficiency) / 2.0, 1),
            business_impact: score(revenue / 10_000.0 * 10.0, BUSINESS_IMPACT_BASE),
            cost_efficiency: score(n / 100.0 * 10.0, COST_EFFICIENCY_BASE),
            innovation_score: score(customer_ratio * 100.0, INNOVATION_SCORE_BASE),
            throughput: count as u64 * 100,
            latency: self.source.uniform_int(20, 30),
            error_rate: round_dp(self.source.uniform(0.1, 1.0), 1),
            data_velocity: count as u64 * 200,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::with_random()
    }
}

/// Summary totals for an order list
pub fn summarize(orders: &[Order]) -> OrderSummary {
    let total_orders = orders.len();
    OrderSummary {
        total_orders,
        total_revenue: total_revenue(orders).round_dp(2),
        total_customers: distinct_customers(orders),
        total_products: total_orders * 4 / 5,
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

fn score(increment: f64, base: f64) -> u64 {
    (increment.max(0.0) + base).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::source::{FixedSource, SeededSource};
    use crate::orders::sample_orders;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fixed(value: f64) -> Aggregator {
        Aggregator::new(Arc::new(FixedSource::new(value)))
    }

    #[test]
    fn test_catalog_summary() {
        let summary = summarize(&sample_orders());
        assert_eq!(summary.total_orders, 50);
        assert_eq!(summary.total_revenue, dec!(54276.34));
        assert_eq!(summary.total_customers, 50);
        assert_eq!(summary.total_products, 40);
    }

    #[test]
    fn test_catalog_performance() {
        let snapshot = fixed(0.5).aggregate(&sample_orders());
        let perf = &snapshot.performance;

        assert_eq!(perf.data_quality, 95.9);
        assert_eq!(perf.processing_efficiency, 80.5);
        assert_eq!(perf.system_uptime, 99.0);
        assert_eq!(perf.pipeline_health, 88.2);
        assert_eq!(perf.business_impact, 134);
        assert_eq!(perf.cost_efficiency, 80);
        assert_eq!(perf.innovation_score, 170);
        assert_eq!(perf.throughput, 5000);
        assert_eq!(perf.latency, 35);
        assert_eq!(perf.error_rate, 0.6);
        assert_eq!(perf.data_velocity, 10000);
    }

    #[test]
    fn test_empty_input_yields_zero_totals() {
        let snapshot = fixed(0.0).aggregate(&[]);
        assert_eq!(snapshot.summary.total_orders, 0);
        assert_eq!(snapshot.summary.total_revenue, Decimal::ZERO);
        assert_eq!(snapshot.summary.total_customers, 0);
        assert_eq!(snapshot.summary.total_products, 0);
        assert_eq!(snapshot.performance.data_quality, 85.0);
        assert_eq!(snapshot.performance.processing_efficiency, 80.0);
        assert_eq!(snapshot.performance.innovation_score, 70);
        assert_eq!(snapshot.performance.throughput, 0);
    }

    #[test]
    fn test_percentages_stay_clamped() {
        let huge = vec![Order::new(1, "Whale", dec!(10000000))];
        let tiny = vec![Order::new(1, "Minnow", dec!(0.01))];
        let many: Vec<Order> = (0..5000)
            .map(|i| Order::new(i, format!("c{}", i), dec!(1)))
            .collect();

        for source in [FixedSource::low(), FixedSource::new(0.5), FixedSource::high()] {
            let aggregator = Aggregator::new(Arc::new(source));
            for orders in [&huge, &tiny, &many, &Vec::new()] {
                let perf = aggregator.aggregate(orders).performance;
                assert!(DATA_QUALITY_RANGE.contains(&perf.data_quality));
                assert!(PROCESSING_EFFICIENCY_RANGE.contains(&perf.processing_efficiency));
                assert!(SYSTEM_UPTIME_RANGE.contains(&perf.system_uptime));
                assert!(PIPELINE_HEALTH_RANGE.contains(&perf.pipeline_health));
                assert!((20..50).contains(&perf.latency));
                assert!((0.1..=1.1).contains(&perf.error_rate));
                assert!(perf.business_impact >= 80);
                assert!(perf.cost_efficiency >= 75);
                assert!(perf.innovation_score >= 70);
            }
        }
    }

    #[test]
    fn test_repeat_aggregation_keeps_totals() {
        let orders = sample_orders();
        let aggregator = Aggregator::with_random();

        let first = aggregator.aggregate(&orders);
        for _ in 0..10 {
            let next = aggregator.aggregate(&orders);
            assert_eq!(next.summary, first.summary);
            assert_eq!(next.performance.data_quality, first.performance.data_quality);
            assert_eq!(next.performance.throughput, first.performance.throughput);
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let orders = sample_orders();
        let a = Aggregator::new(Arc::new(SeededSource::new(7))).aggregate(&orders);
        let b = Aggregator::new(Arc::new(SeededSource::new(7))).aggregate(&orders);
        assert_eq!(a.performance, b.performance);
    }
}
