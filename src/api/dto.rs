//! Data Transfer Objects
//!
//! Response bodies for the dashboard endpoints. They derive both serde
//! directions so the HTTP client decodes exactly what the server encodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateSnapshot;
use crate::orders::Order;
use crate::telemetry::{EngineeringMetrics, Gauges, KpiDisplay, KpiPanel, PipelineChart, RealTimeSeries};

/// GET /orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub total: usize,
    pub orders: Vec<Order>,
}

/// GET /aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatesResponse {
    #[serde(flatten)]
    pub snapshot: AggregateSnapshot,
    /// Number of refreshes since startup
    pub revision: u64,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "stale"
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub ws_connections: usize,
    pub last_aggregate_refresh: DateTime<Utc>,
}

/// GET /dashboard-metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetricsResponse {
    pub kpi: KpiPanel,
    pub display: KpiDisplay,
    pub gauges: Gauges,
    pub engineering: EngineeringMetrics,
    pub kpi_updated_at: DateTime<Utc>,
}

/// GET /real-time-data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealTimeDataResponse {
    pub now: DateTime<Utc>,
    pub pipeline: PipelineChart,
    pub series: RealTimeSeries,
}
