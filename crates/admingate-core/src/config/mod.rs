//! Application configuration schemas.
//!
//! Configuration is assembled by the `config` crate from optional TOML files
//! and `ADMINGATE__`-prefixed environment variables, then checked once by
//! [`AppConfig::validate`] before the server starts.

pub mod app;
pub mod auth;
pub mod logging;
pub mod proxy;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MIN_SECRET_LENGTH};
pub use self::logging::LoggingConfig;
pub use self::proxy::ProxyConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Prefix for environment variable overrides, e.g.
/// `ADMINGATE__AUTH__SESSION_SECRET`.
pub const ENV_PREFIX: &str = "ADMINGATE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Admin credentials and session signing secret.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Backend API proxy settings.
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default locations.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml` and environment
    /// variables prefixed with `ADMINGATE__`. Missing files are skipped.
    pub fn load(env: &str) -> AppResult<Self> {
        tracing::debug!(env, "Loading configuration from config/");
        let builder = config::Config::builder()
            .set_default("server.environment", env)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file, then apply the environment
    /// overlay. The file must exist.
    pub fn load_from(path: &str, env: &str) -> AppResult<Self> {
        tracing::debug!(path, env, "Loading configuration");
        let builder = config::Config::builder()
            .set_default("server.environment", env)?
            .add_source(config::File::with_name(path).required(true));

        Self::finish(builder)
    }

    /// Parse configuration from an in-memory TOML document, without any
    /// environment overlay.
    pub fn from_toml_str(toml: &str) -> AppResult<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AppResult<Self> {
        let config = builder
            .add_source(
                // Values stay strings; serde converts them per field, so
                // numeric-looking credentials keep their exact text.
                config::Environment::with_prefix(ENV_PREFIX).separator("__"),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check the startup invariants.
    ///
    /// A missing or short signing secret would make every session token
    /// forgeable, so it is a fatal configuration error rather than a runtime
    /// failure on each signing call.
    pub fn validate(&self) -> AppResult<()> {
        let secret_len = self.auth.session_secret.len();
        if secret_len == 0 {
            return Err(AppError::configuration(
                "auth.session_secret must be set (ADMINGATE__AUTH__SESSION_SECRET)",
            ));
        }
        if secret_len < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.session_secret must be at least {MIN_SECRET_LENGTH} bytes, got {secret_len}"
            )));
        }
        if self.auth.admin_username.trim().is_empty() {
            return Err(AppError::configuration("auth.admin_username must be set"));
        }
        if self.auth.admin_password.is_empty() {
            return Err(AppError::configuration("auth.admin_password must be set"));
        }
        if let Some(url) = &self.proxy.backend_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::configuration(format!(
                    "proxy.backend_url must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }

    /// Returns a copy safe to print: secrets and credentials are masked.
    pub fn redacted(&self) -> Self {
        Self {
            auth: self.auth.redacted(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn valid_config() -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                session_secret: "0123456789abcdef0123456789abcdef".to_string(),
                admin_username: "admin".to_string(),
                admin_password: "hunter2".to_string(),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = valid_config();
        config.auth.session_secret.clear();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = valid_config();
        config.auth.session_secret = "a".repeat(MIN_SECRET_LENGTH - 1);
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("at least"));
    }

    #[test]
    fn test_missing_admin_credentials_rejected() {
        let mut config = valid_config();
        config.auth.admin_username = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.auth.admin_password.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_backend_url_rejected() {
        let mut config = valid_config();
        config.proxy.backend_url = Some("ftp://backend".to_string());
        assert!(config.validate().is_err());

        config.proxy.backend_url = Some("http://127.0.0.1:9000".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_applies_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9090
            environment = "production"

            [auth]
            admin_username = "root"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.is_production());
        assert_eq!(config.auth.admin_username, "root");
        assert!(config.auth.session_secret.is_empty());
        assert_eq!(config.proxy.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overlay_keeps_numeric_strings() {
        // SAFETY: no other test in this crate reads or writes these variables.
        unsafe {
            std::env::set_var("ADMINGATE__AUTH__ADMIN_PASSWORD", "007");
            std::env::set_var("ADMINGATE__AUTH__ADMIN_USERNAME", "0042");
            std::env::set_var(
                "ADMINGATE__AUTH__SESSION_SECRET",
                "12345678901234567890123456789012345",
            );
            std::env::set_var("ADMINGATE__SERVER__PORT", "9191");
        }

        let loaded = AppConfig::load("overlay-test");

        unsafe {
            std::env::remove_var("ADMINGATE__AUTH__ADMIN_PASSWORD");
            std::env::remove_var("ADMINGATE__AUTH__ADMIN_USERNAME");
            std::env::remove_var("ADMINGATE__AUTH__SESSION_SECRET");
            std::env::remove_var("ADMINGATE__SERVER__PORT");
        }

        let config = loaded.unwrap();
        assert_eq!(config.auth.admin_password, "007");
        assert_eq!(config.auth.admin_username, "0042");
        assert_eq!(
            config.auth.session_secret,
            "12345678901234567890123456789012345"
        );
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.environment, "overlay-test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let shown = valid_config().redacted();
        assert_eq!(shown.auth.session_secret, "****");
        assert_eq!(shown.auth.admin_password, "****");
        assert_eq!(shown.auth.admin_username, "admin");

        let debug = format!("{:?}", valid_config().auth);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("0123456789abcdef"));
    }
}
