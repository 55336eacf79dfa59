//! Engineering metrics and the rolling real-time series

use serde::{Deserialize, Serialize};

use crate::aggregate::MetricsSource;

/// Number of points in each real-time series
pub const REAL_TIME_POINTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringMetrics {
    pub data_quality: f64,
    pub processing_efficiency: f64,
    pub system_uptime: f64,
    pub data_velocity: u64,
    pub error_rate: f64,
    pub latency: f64,
    pub throughput: u64,
    pub pipeline_health: f64,
    pub business_impact: f64,
    pub cost_efficiency: f64,
    pub innovation_score: f64,
}

impl EngineeringMetrics {
    pub fn sample(source: &dyn MetricsSource) -> Self {
        Self {
            data_quality: source.uniform(85.0, 15.0),
            processing_efficiency: source.uniform(80.0, 20.0),
            system_uptime: source.uniform(95.0, 5.0),
            data_velocity: source.uniform_int(10_000, 5000),
            error_rate: source.uniform(0.1, 2.0),
            latency: source.uniform(20.0, 50.0),
            throughput: source.uniform_int(8000, 2000),
            pipeline_health: source.uniform(90.0, 10.0),
            business_impact: source.uniform(80.0, 20.0),
            cost_efficiency: source.uniform(75.0, 25.0),
            innovation_score: source.uniform(70.0, 30.0),
        }
    }
}

/// Last twenty samples of the headline scores
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RealTimeSeries {
    pub data_quality: Vec<f64>,
    pub processing_efficiency: Vec<f64>,
    pub system_uptime: Vec<f64>,
}

impl RealTimeSeries {
    pub fn sample(source: &dyn MetricsSource) -> Self {
        let series = |low: f64, span: f64| -> Vec<f64> {
            (0..REAL_TIME_POINTS).map(|_| source.uniform(low, span)).collect()
        };

        Self {
            data_quality: series(80.0, 20.0),
            processing_efficiency: series(70.0, 30.0),
            system_uptime: series(90.0, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{FixedSource, SeededSource};

    #[test]
    fn test_metrics_ranges() {
        let source = SeededSource::new(3);
        for _ in 0..100 {
            let m = EngineeringMetrics::sample(&source);
            assert!((85.0..100.0).contains(&m.data_quality));
            assert!((95.0..100.0).contains(&m.system_uptime));
            assert!((10_000..15_000).contains(&m.data_velocity));
            assert!((8000..10_000).contains(&m.throughput));
            assert!((0.1..2.1).contains(&m.error_rate));
        }
    }

    #[test]
    fn test_series_length() {
        let series = RealTimeSeries::sample(&FixedSource::new(0.25));
        assert_eq!(series.data_quality.len(), REAL_TIME_POINTS);
        assert_eq!(series.processing_efficiency.len(), REAL_TIME_POINTS);
        assert_eq!(series.system_uptime.len(), REAL_TIME_POINTS);
        assert_eq!(series.data_quality[0], 85.0);
        assert_eq!(series.system_uptime[19], 92.5);
    }
}
