//! API Routes
//!
//! Route handlers organized by functionality.

pub mod aggregates;
pub mod dashboard;
pub mod health;
pub mod orders;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
