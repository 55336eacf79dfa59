//! Metrics Sources
//!
//! Every randomized figure on the dashboard is drawn through a
//! [`MetricsSource`]. Production code uses [`RandomSource`]; tests plug in
//! [`FixedSource`] or [`SeededSource`] to get reproducible snapshots.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Largest value a source may return
pub const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

/// Supplier of unit-interval samples for synthetic metrics
pub trait MetricsSource: Send + Sync {
    /// Next sample in `[0, 1)`
    fn next_unit(&self) -> f64;

    /// Sample uniformly from `[low, low + span)`
    fn uniform(&self, low: f64, span: f64) -> f64 {
        low + self.next_unit() * span
    }

    /// Sample an integer from `[low, low + span)`
    fn uniform_int(&self, low: u64, span: u64) -> u64 {
        low + (self.next_unit() * span as f64).floor() as u64
    }
}

/// Thread-local system randomness
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSource;

impl MetricsSource for RandomSource {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic pseudo-random stream from a seed
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MetricsSource for SeededSource {
    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random::<f64>()
    }
}

/// Always returns the same sample
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(f64);

impl FixedSource {
    /// Values outside `[0, 1)` are clamped into it
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, MAX_UNIT))
    }

    /// Source pinned to the bottom of every range
    pub fn low() -> Self {
        Self::new(0.0)
    }

    /// Source pinned to the top of every range
    pub fn high() -> Self {
        Self::new(MAX_UNIT)
    }
}

impl MetricsSource for FixedSource {
    fn next_unit(&self) -> f64 {
        self.0
    }
}
