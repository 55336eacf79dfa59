//! Key business metrics panel

use serde::{Deserialize, Serialize};

use crate::aggregate::MetricsSource;
use crate::display::{format_currency, format_dollars, format_millis, format_percent, group_thousands, round_dp};

/// Raw KPI values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiPanel {
    /// Pipeline health percentage, 85..100
    pub health: f64,
    /// Records per second, 8000..16000
    pub throughput: u64,
    pub latency_ms: u64,
    /// Percentage, 0.5..3.5
    pub error_rate: f64,
    /// Whole dollars, 100000..150000
    pub sales: u64,
    pub order_count: u64,
    pub avg_order_value: f64,
}

/// KPI values rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub sales_value: String,
    pub order_count: String,
    pub avg_order_value: String,
    pub health_value: String,
    pub throughput_value: String,
    pub latency_value: String,
    pub error_rate_value: String,
}

impl KpiPanel {
    pub fn sample(source: &dyn MetricsSource) -> Self {
        Self {
            health: round_dp(source.uniform(85.0, 15.0), 1),
            throughput: source.uniform_int(8000, 8000),
            latency_ms: source.uniform_int(80, 200),
            error_rate: round_dp(source.uniform(0.5, 3.0), 1),
            sales: source.uniform_int(100_000, 50_000),
            order_count: source.uniform_int(1500, 500),
            avg_order_value: round_dp(source.uniform(50.0, 40.0), 2),
        }
    }

    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            sales_value: format_dollars(self.sales),
            order_count: group_thousands(self.order_count),
            avg_order_value: format_currency(self.avg_order_value),
            health_value: format_percent(self.health),
            throughput_value: group_thousands(self.throughput),
            latency_value: format_millis(self.latency_ms),
            error_rate_value: format_percent(self.error_rate),
        }
    }
}

/// Values shown before the first refresh tick
impl Default for KpiPanel {
    fn default() -> Self {
        Self {
            health: 92.9,
            throughput: 13_470,
            latency_ms: 142,
            error_rate: 1.8,
            sales: 127_450,
            order_count: 1847,
            avg_order_value: 69.12,
        }
    }
}
