//! Backend API proxy configuration.

use serde::{Deserialize, Serialize};

/// Where `/admin/api/proxy/*` requests are forwarded to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL of the backend API (e.g. `http://127.0.0.1:9000`).
    /// When unset the proxy answers `503`.
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Upstream request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
