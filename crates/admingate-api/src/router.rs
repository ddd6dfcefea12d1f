//! Route definitions for the AdminGate HTTP surface.
//!
//! Everything under `/admin` passes through the admin gate before reaching a
//! handler; `/health` sits outside the gated namespace.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{any, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes, the gate, and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .merge(admin_routes())
        .merge(auth_routes())
        .merge(proxy_routes())
        .merge(health_routes())
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::admin_gate,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Login page and protected admin surface.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route("/admin/login", get(handlers::admin::login_page))
        .route("/admin/api/session", get(handlers::admin::session_info))
}

/// Session transitions.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/api/auth/login", post(handlers::auth::login))
        .route("/admin/api/auth/logout", post(handlers::auth::logout))
        .route("/admin/api/auth/refresh", post(handlers::auth::refresh))
}

/// Backend API pass-through.
fn proxy_routes() -> Router<AppState> {
    Router::new().route("/admin/api/proxy/{*path}", any(handlers::proxy::forward))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
