//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the Tally server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateSnapshot;
use crate::telemetry::{EngineeringMetrics, KpiDisplay, KpiPanel, PipelineChart, RealTimeSeries};

/// Topic names
pub mod topics {
    pub const CLOCK: &str = "clock";
    pub const KPI: &str = "kpi";
    pub const PIPELINE: &str = "pipeline";
    pub const ENGINEERING: &str = "engineering";
    pub const AGGREGATES: &str = "aggregates";
    pub const SYSTEM: &str = "system";
    /// Matches every topic
    pub const ALL: &str = "*";

    pub const KNOWN: [&str; 7] = [CLOCK, KPI, PIPELINE, ENGINEERING, AGGREGATES, SYSTEM, ALL];
}

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// Topics to subscribe to (e.g., "kpi", "*")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe { topics: Vec<String> },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Clock tick
    Clock { now: DateTime<Utc> },
    /// Refreshed KPI panel
    Kpi {
        panel: KpiPanel,
        display: KpiDisplay,
    },
    /// Refreshed pipeline chart and gauges
    Pipeline { chart: PipelineChart },
    /// Refreshed engineering metrics
    Engineering {
        metrics: EngineeringMetrics,
        series: RealTimeSeries,
    },
    /// Fresh aggregate snapshot
    Aggregates { snapshot: AggregateSnapshot },
    /// Informational system notice
    System { message: String },
    /// Subscription confirmed
    Subscribed { topics: Vec<String> },
    /// Unsubscription confirmed
    Unsubscribed { topics: Vec<String> },
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
    /// Connection established
    Connected { connection_id: String },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to
    pub topic: &'static str,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn clock(now: DateTime<Utc>) -> Self {
        Self {
            topic: topics::CLOCK,
            message: ServerMessage::Clock { now },
        }
    }

    pub fn kpi(panel: KpiPanel) -> Self {
        let display = panel.display();
        Self {
            topic: topics::KPI,
            message: ServerMessage::Kpi { panel, display },
        }
    }

    pub fn pipeline(chart: PipelineChart) -> Self {
        Self {
            topic: topics::PIPELINE,
            message: ServerMessage::Pipeline { chart },
        }
    }

    pub fn engineering(metrics: EngineeringMetrics, series: RealTimeSeries) -> Self {
        Self {
            topic: topics::ENGINEERING,
            message: ServerMessage::Engineering { metrics, series },
        }
    }

    pub fn aggregates(snapshot: AggregateSnapshot) -> Self {
        Self {
            topic: topics::AGGREGATES,
            message: ServerMessage::Aggregates { snapshot },
        }
    }

    pub fn system(message: &str) -> Self {
        Self {
            topic: topics::SYSTEM,
            message: ServerMessage::System {
                message: message.to_string(),
            },
        }
    }

    /// One log line summarizing the event
    pub fn log(&self) {
        let topic = self.topic;
        match &self.message {
            ServerMessage::Clock { now } => {
                tracing::debug!(topic, now = %now.format("%H:%M:%S"), "tick");
            }
            ServerMessage::Kpi { display: kpi, .. } => {
                tracing::info!(
                    topic,
                    sales = %kpi.sales_value,
                    orders = %kpi.order_count,
                    aov = %kpi.avg_order_value,
                    health = %kpi.health_value,
                    "KPI refresh"
                );
            }
            ServerMessage::Pipeline { chart } => {
                tracing::info!(
                    topic,
                    pipeline_health = chart.gauges.pipeline_health,
                    data_quality = chart.gauges.data_quality,
                    "Pipeline refresh"
                );
            }
            ServerMessage::Engineering { metrics, .. } => {
                tracing::info!(topic, metrics = ?metrics, "Engineering refresh");
            }
            ServerMessage::Aggregates { snapshot } => {
                let perf = &snapshot.performance;
                tracing::info!(
                    topic,
                    revenue = %snapshot.summary.total_revenue,
                    data_quality = perf.data_quality,
                    pipeline_health = perf.pipeline_health,
                    latency = perf.latency,
                    error_rate = perf.error_rate,
                    "Aggregate refresh"
                );
            }
            ServerMessage::System { message } => tracing::info!(topic, "{}", message),
            other => tracing::debug!(topic, message = ?other, "event"),
        }
    }
}
