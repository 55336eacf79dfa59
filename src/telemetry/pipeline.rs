//! Pipeline performance chart and gauges
//!
//! Four line series across six pipeline stages. Each point is the stage's
//! base score plus up to ten points of jitter.

use serde::{Deserialize, Serialize};

use crate::aggregate::MetricsSource;

pub const PIPELINE_STAGES: [&str; 6] = [
    "Data Fetch",
    "Enrichment",
    "Validation",
    "Storage",
    "API Response",
    "Monitoring",
];

const SERIES_BASES: [(&str, [f64; 6]); 4] = [
    ("System Uptime", [85.0, 88.0, 92.0, 89.0, 94.0, 91.0]),
    ("Data Quality", [78.0, 82.0, 85.0, 87.0, 89.0, 86.0]),
    ("Processing Efficiency", [82.0, 85.0, 88.0, 90.0, 93.0, 89.0]),
    ("Business Impact", [75.0, 79.0, 83.0, 86.0, 88.0, 85.0]),
];

const JITTER: f64 = 10.0;

/// One named line across all stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauges {
    /// 85..100
    pub pipeline_health: f64,
    /// 80..95
    pub data_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineChart {
    pub stages: Vec<String>,
    pub series: Vec<Series>,
    pub gauges: Gauges,
}

impl PipelineChart {
    pub fn sample(source: &dyn MetricsSource) -> Self {
        let series = SERIES_BASES
            .iter()
            .map(|(name, bases)| Series {
                name: name.to_string(),
                points: bases.iter().map(|&b| source.uniform(b, JITTER)).collect(),
            })
            .collect();

        Self {
            stages: PIPELINE_STAGES.iter().map(|s| s.to_string()).collect(),
            series,
            gauges: Gauges {
                pipeline_health: source.uniform(85.0, 15.0),
                data_quality: source.uniform(80.0, 15.0),
            },
        }
    }
}

/// The chart as first drawn, with no jitter applied
impl Default for PipelineChart {
    fn default() -> Self {
        Self {
            stages: PIPELINE_STAGES.iter().map(|s| s.to_string()).collect(),
            series: SERIES_BASES
                .iter()
                .map(|(name, bases)| Series {
                    name: name.to_string(),
                    points: bases.to_vec(),
                })
                .collect(),
            gauges: Gauges {
                pipeline_health: 92.9,
                data_quality: 85.1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{FixedSource, SeededSource};

    #[test]
    fn test_chart_shape() {
        let chart = PipelineChart::sample(&SeededSource::new(1));
        assert_eq!(chart.stages.len(), 6);
        assert_eq!(chart.series.len(), 4);
        assert!(chart.series.iter().all(|s| s.points.len() == 6));
        assert_eq!(chart.series[0].name, "System Uptime");
    }

    #[test]
    fn test_points_within_jitter_of_base() {
        let chart = PipelineChart::sample(&SeededSource::new(99));
        for (series, (_, bases)) in chart.series.iter().zip(SERIES_BASES.iter()) {
            for (point, base) in series.points.iter().zip(bases.iter()) {
                assert!(*point >= *base && *point < base + JITTER);
            }
        }
        assert!((85.0..100.0).contains(&chart.gauges.pipeline_health));
        assert!((80.0..95.0).contains(&chart.gauges.data_quality));
    }

    #[test]
    fn test_low_source_reproduces_bases() {
        let chart = PipelineChart::sample(&FixedSource::low());
        assert_eq!(chart.series, PipelineChart::default().series);
    }
}
