//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use admingate_core::config::AppConfig;
use admingate_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the AdminGate server until Ctrl+C.
///
/// Fails before binding when the configuration is invalid.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AdminGate server...");

    let addr = config.server.bind_address();
    let state = AppState::new(config).await?;
    tracing::info!(
        environment = %state.config.server.environment,
        secure_cookies = state.secure_cookies(),
        proxy_configured = state.config.proxy.backend_url.is_some(),
        "Application state initialized"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AdminGate listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("AdminGate server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
