//! HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod proxy;

use admingate_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes. Registered before the gate layer so
/// unknown admin paths are still gated.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
