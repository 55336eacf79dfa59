//! Refresh Loop
//!
//! Periodically regenerates every dashboard panel and hands the result to
//! the presentation layer.
//!
//! | timer       | period | first tick          |
//! |-------------|--------|---------------------|
//! | clock       | 1 s    | immediately         |
//! | kpi         | 3 s    | after one period    |
//! | pipeline    | 5 s    | after one period    |
//! | engineering | 10 s   | immediately         |
//! | aggregates  | 15 s   | after startup delay |
//!
//! Timers are independent and last-write-wins on their own slice of
//! [`DashboardState`].

mod scheduler;
mod state;

pub use scheduler::{RefreshConfig, RefreshKind, RefreshScheduler};
pub use state::{DashboardState, EngineeringPanel, Slice, Stamped};
