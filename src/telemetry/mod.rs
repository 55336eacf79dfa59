//! Synthetic Telemetry
//!
//! Cosmetic dashboard panels sampled from a [`MetricsSource`](crate::aggregate::MetricsSource)
//! rather than computed from orders:
//!
//! - **KpiPanel**: sales and pipeline headline numbers
//! - **PipelineChart**: per-stage line series plus two gauges
//! - **EngineeringMetrics**: eleven engineering scores
//! - **RealTimeSeries**: twenty-point history lines

mod engineering;
mod kpi;
mod pipeline;

pub use engineering::{EngineeringMetrics, RealTimeSeries, REAL_TIME_POINTS};
pub use kpi::{KpiDisplay, KpiPanel};
pub use pipeline::{Gauges, PipelineChart, Series, PIPELINE_STAGES};
