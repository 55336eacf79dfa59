//! Refresh Scheduler
//!
//! One tokio task per timer. Timers never coordinate: each samples or
//! aggregates, replaces its own slice, then publishes to the hub. Dropping
//! the scheduler aborts every task.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::state::{DashboardState, EngineeringPanel};
use crate::aggregate::{Aggregator, MetricsSource};
use crate::telemetry::{KpiPanel, PipelineChart};
use crate::websocket::{ConnectionHub, WsEvent};

/// Timer periods in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_clock_ms")]
    pub clock_ms: u64,

    #[serde(default = "default_kpi_ms")]
    pub kpi_ms: u64,

    #[serde(default = "default_pipeline_ms")]
    pub pipeline_ms: u64,

    #[serde(default = "default_engineering_ms")]
    pub engineering_ms: u64,

    #[serde(default = "default_aggregates_ms")]
    pub aggregates_ms: u64,

    /// One-off wait before the first aggregate refresh
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
}

fn default_clock_ms() -> u64 {
    1000
}

fn default_kpi_ms() -> u64 {
    3000
}

fn default_pipeline_ms() -> u64 {
    5000
}

fn default_engineering_ms() -> u64 {
    10_000
}

fn default_aggregates_ms() -> u64 {
    15_000
}

fn default_startup_delay_ms() -> u64 {
    300
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            clock_ms: default_clock_ms(),
            kpi_ms: default_kpi_ms(),
            pipeline_ms: default_pipeline_ms(),
            engineering_ms: default_engineering_ms(),
            aggregates_ms: default_aggregates_ms(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }
}

/// The independent refresh timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshKind {
    Clock,
    Kpi,
    Pipeline,
    Engineering,
    Aggregates,
}

impl RefreshKind {
    pub const ALL: [RefreshKind; 5] = [
        RefreshKind::Clock,
        RefreshKind::Kpi,
        RefreshKind::Pipeline,
        RefreshKind::Engineering,
        RefreshKind::Aggregates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RefreshKind::Clock => "clock",
            RefreshKind::Kpi => "kpi",
            RefreshKind::Pipeline => "pipeline",
            RefreshKind::Engineering => "engineering",
            RefreshKind::Aggregates => "aggregates",
        }
    }

    fn period(&self, config: &RefreshConfig) -> Duration {
        let ms = match self {
            RefreshKind::Clock => config.clock_ms,
            RefreshKind::Kpi => config.kpi_ms,
            RefreshKind::Pipeline => config.pipeline_ms,
            RefreshKind::Engineering => config.engineering_ms,
            RefreshKind::Aggregates => config.aggregates_ms,
        };
        // tokio panics on a zero period
        Duration::from_millis(ms.max(1))
    }

    /// Delay before the first tick
    fn first_delay(&self, config: &RefreshConfig) -> Duration {
        match self {
            RefreshKind::Clock | RefreshKind::Engineering => Duration::ZERO,
            RefreshKind::Kpi | RefreshKind::Pipeline => self.period(config),
            RefreshKind::Aggregates => Duration::from_millis(config.startup_delay_ms),
        }
    }
}

impl fmt::Display for RefreshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What every timer task needs to do its work
struct RefreshContext {
    state: Arc<DashboardState>,
    aggregator: Aggregator,
    source: Arc<dyn MetricsSource>,
    hub: Option<Arc<ConnectionHub>>,
}

impl RefreshContext {
    async fn refresh(&self, kind: RefreshKind) {
        let (revision, event) = match kind {
            RefreshKind::Clock => {
                let now = Utc::now();
                (self.state.clock.replace(now).await, WsEvent::clock(now))
            }
            RefreshKind::Kpi => {
                let panel = KpiPanel::sample(self.source.as_ref());
                (self.state.kpi.replace(panel.clone()).await, WsEvent::kpi(panel))
            }
            RefreshKind::Pipeline => {
                let chart = PipelineChart::sample(self.source.as_ref());
                (
                    self.state.pipeline.replace(chart.clone()).await,
                    WsEvent::pipeline(chart),
                )
            }
            RefreshKind::Engineering => {
                let panel = EngineeringPanel::sample(self.source.as_ref());
                let revision = self.state.engineering.replace(panel.clone()).await;
                (revision, WsEvent::engineering(panel.metrics, panel.series))
            }
            RefreshKind::Aggregates => {
                let snapshot = self.aggregator.aggregate(&self.state.orders);
                (
                    self.state.aggregates.replace(snapshot.clone()).await,
                    WsEvent::aggregates(snapshot),
                )
            }
        };

        tracing::trace!(slice = kind.name(), revision, "Slice refreshed");

        if let Some(hub) = &self.hub {
            hub.publish(event).await;
        }
    }
}

struct RefreshTask {
    kind: RefreshKind,
    handle: JoinHandle<()>,
}

/// Owner of the running refresh timers
pub struct RefreshScheduler {
    tasks: Vec<RefreshTask>,
}

impl RefreshScheduler {
    /// Spawn every timer. Must be called inside a tokio runtime.
    pub fn start(
        state: Arc<DashboardState>,
        aggregator: Aggregator,
        source: Arc<dyn MetricsSource>,
        hub: Option<Arc<ConnectionHub>>,
        config: &RefreshConfig,
    ) -> Self {
        let ctx = Arc::new(RefreshContext {
            state,
            aggregator,
            source,
            hub,
        });
        let now = Instant::now();

        let tasks = RefreshKind::ALL
            .iter()
            .map(|&kind| {
                let ctx = Arc::clone(&ctx);
                let first = now + kind.first_delay(config);
                let period = kind.period(config);

                let handle = tokio::spawn(async move {
                    let mut interval = tokio::time::interval_at(first, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    loop {
                        interval.tick().await;
                        ctx.refresh(kind).await;
                    }
                });

                RefreshTask { kind, handle }
            })
            .collect();

        tracing::info!(
            clock_ms = config.clock_ms,
            kpi_ms = config.kpi_ms,
            pipeline_ms = config.pipeline_ms,
            engineering_ms = config.engineering_ms,
            aggregates_ms = config.aggregates_ms,
            "Refresh scheduler started"
        );

        Self { tasks }
    }

    /// Timers still running
    pub fn running(&self) -> Vec<RefreshKind> {
        self.tasks
            .iter()
            .filter(|t| !t.handle.is_finished())
            .map(|t| t.kind)
            .collect()
    }

    /// Abort every timer
    pub fn stop(self) {
        // Drop does the work
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.handle.abort();
        }
        tracing::info!(timers = self.tasks.len(), "Refresh scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::FixedSource;
    use crate::orders::sample_orders;
    use crate::websocket::{topics, HubConfig};

    fn setup() -> (Arc<DashboardState>, Aggregator, Arc<dyn MetricsSource>) {
        let source: Arc<dyn MetricsSource> = Arc::new(FixedSource::new(0.5));
        let aggregator = Aggregator::new(Arc::clone(&source));
        let state = Arc::new(DashboardState::new(
            sample_orders(),
            &aggregator,
            source.as_ref(),
        ));
        (state, aggregator, source)
    }

    fn start(
        state: &Arc<DashboardState>,
        aggregator: Aggregator,
        source: Arc<dyn MetricsSource>,
        hub: Option<Arc<ConnectionHub>>,
    ) -> RefreshScheduler {
        RefreshScheduler::start(
            Arc::clone(state),
            aggregator,
            source,
            hub,
            &RefreshConfig::default(),
        )
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[test]
    fn test_default_periods() {
        let config = RefreshConfig::default();
        assert_eq!(RefreshKind::Clock.period(&config), Duration::from_secs(1));
        assert_eq!(RefreshKind::Kpi.period(&config), Duration::from_secs(3));
        assert_eq!(RefreshKind::Pipeline.period(&config), Duration::from_secs(5));
        assert_eq!(RefreshKind::Engineering.period(&config), Duration::from_secs(10));
        assert_eq!(RefreshKind::Aggregates.period(&config), Duration::from_secs(15));
        assert_eq!(
            RefreshKind::Aggregates.first_delay(&config),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_zero_period_is_bumped() {
        let config = RefreshConfig {
            clock_ms: 0,
            ..Default::default()
        };
        assert_eq!(RefreshKind::Clock.period(&config), Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ticks_every_second() {
        let (state, aggregator, source) = setup();
        let _scheduler = start(&state, aggregator, source, None);

        sleep_ms(3500).await;
        // Ticks at 0s, 1s, 2s, 3s
        assert_eq!(state.clock.get().await.revision, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_kpi_waits_one_period() {
        let (state, aggregator, source) = setup();
        let _scheduler = start(&state, aggregator, source, None);

        sleep_ms(2900).await;
        assert_eq!(state.kpi.get().await.revision, 0);
        assert_eq!(state.kpi.value().await, KpiPanel::default());

        sleep_ms(200).await;
        let kpi = state.kpi.get().await;
        assert_eq!(kpi.revision, 1);
        assert_eq!(kpi.value, KpiPanel::sample(&FixedSource::new(0.5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aggregates_wait_for_startup_delay() {
        let (state, aggregator, source) = setup();
        let initial = state.aggregates.value().await;
        let _scheduler = start(&state, aggregator, source, None);

        sleep_ms(200).await;
        assert_eq!(state.aggregates.get().await.revision, 0);

        sleep_ms(200).await;
        let refreshed = state.aggregates.get().await;
        assert_eq!(refreshed.revision, 1);
        assert_eq!(refreshed.value.summary, initial.summary);

        sleep_ms(15_000).await;
        assert_eq!(state.aggregates.get().await.revision, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_engineering_fires_immediately_pipeline_later() {
        let (state, aggregator, source) = setup();
        let _scheduler = start(&state, aggregator, source, None);

        sleep_ms(100).await;
        assert_eq!(state.engineering.get().await.revision, 1);
        assert_eq!(state.pipeline.get().await.revision, 0);

        sleep_ms(5000).await;
        assert_eq!(state.pipeline.get().await.revision, 1);
        assert_eq!(state.engineering.get().await.revision, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_tears_down_timers() {
        let (state, aggregator, source) = setup();
        let scheduler = start(&state, aggregator, source, None);
        assert_eq!(scheduler.running().len(), 5);

        sleep_ms(1500).await;
        scheduler.stop();
        sleep_ms(10).await;
        let frozen = state.clock.get().await.revision;

        sleep_ms(10_000).await;
        assert_eq!(state.clock.get().await.revision, frozen);
        assert_eq!(state.kpi.get().await.revision, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_are_published() {
        let (state, aggregator, source) = setup();
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let mut events = hub.subscribe_broadcast();
        let _scheduler = start(&state, aggregator, source, Some(Arc::clone(&hub)));

        sleep_ms(500).await;

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event.topic);
        }
        assert!(seen.contains(&topics::CLOCK));
        assert!(seen.contains(&topics::ENGINEERING));
        assert!(seen.contains(&topics::AGGREGATES));
        assert!(!seen.contains(&topics::KPI));
    }
}
