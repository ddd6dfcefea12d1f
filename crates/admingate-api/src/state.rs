//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use admingate_auth::{EdgeTokenCodec, RouteGate, SessionPolicy, SessionSecret};
use admingate_core::config::AppConfig;
use admingate_core::error::AppError;
use admingate_core::result::AppResult;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Everything is
/// read-only after startup; fields are `Arc`-wrapped for cheap cloning.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session signing secret
    pub secret: Arc<SessionSecret>,
    /// Route gate (async verifier + session policy)
    pub gate: Arc<RouteGate>,
    /// HTTP client for the backend proxy
    pub http: reqwest::Client,
}

impl AppState {
    /// Validates the configuration and builds the state.
    ///
    /// Fails with a configuration error when the secret or admin credentials
    /// are missing, so a misconfigured server never starts.
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let secret = SessionSecret::from_config(&config.auth)?;
        let codec = EdgeTokenCodec::from_secret(&secret).await?;
        let gate = RouteGate::new(codec, SessionPolicy::default());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy.timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            secret: Arc::new(secret),
            gate: Arc::new(gate),
            http,
        })
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.config.server.is_production()
    }
}
