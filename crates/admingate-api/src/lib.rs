//! # admingate-api
//!
//! HTTP layer for AdminGate built on Axum.
//!
//! Provides the admin route gate middleware, the login/logout/refresh
//! endpoints that write the session cookie, a small protected surface for
//! the dashboard, the pass-through proxy to the backend API, and error
//! mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
