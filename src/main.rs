//! AdminGate server: signed admin session gate in front of an admin area.
//!
//! Loads configuration, initializes logging, and runs the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use admingate_core::config::AppConfig;
use admingate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `ADMINGATE_CONFIG` or the default locations.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ADMINGATE_ENV").unwrap_or_else(|_| "development".to_string());

    match std::env::var("ADMINGATE_CONFIG") {
        Ok(path) => AppConfig::load_from(&path, &env),
        Err(_) => AppConfig::load(&env),
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.server.environment,
        "Starting AdminGate v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::debug!(config = ?config.redacted(), "Effective configuration");

    admingate_api::run_server(config).await
}
