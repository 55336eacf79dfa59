//! Orders
//!
//! Immutable sale records and the built-in catalog the dashboard aggregates.

mod catalog;
mod types;

pub use catalog::sample_orders;
pub use types::{distinct_customers, total_revenue, Order};
