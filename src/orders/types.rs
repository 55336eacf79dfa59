//! Order Types
//!
//! A single sale record and the set-level helpers the aggregator builds on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single sale record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier, unique within a catalog
    pub id: u32,
    /// Customer display name (may use any script)
    pub customer_name: String,
    /// Order amount in US dollars
    pub amount_usd: Decimal,
}

impl Order {
    /// Create a new order
    pub fn new(id: u32, customer_name: impl Into<String>, amount_usd: Decimal) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            amount_usd,
        }
    }

    /// Create an order from an amount expressed in cents
    pub fn from_cents(id: u32, customer_name: impl Into<String>, cents: i64) -> Self {
        Self::new(id, customer_name, Decimal::new(cents, 2))
    }
}

/// Exact decimal sum of all order amounts
pub fn total_revenue(orders: &[Order]) -> Decimal {
    orders.iter().map(|o| o.amount_usd).sum()
}

/// Number of distinct customer names
pub fn distinct_customers(orders: &[Order]) -> usize {
    orders
        .iter()
        .map(|o| o.customer_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}
