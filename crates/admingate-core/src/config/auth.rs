//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum accepted length of the session signing secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Admin credential and session signing configuration.
///
/// There is exactly one admin account; its credentials come from
/// configuration rather than a user database.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HMAC-SHA256 session token signing.
    #[serde(default)]
    pub session_secret: String,
    /// Admin login identifier.
    #[serde(default)]
    pub admin_username: String,
    /// Admin login credential.
    #[serde(default)]
    pub admin_password: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"<redacted>")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    /// Returns a copy with the secret and credential masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            session_secret: mask(&self.session_secret),
            admin_username: self.admin_username.clone(),
            admin_password: mask(&self.admin_password),
        }
    }
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "****".to_string()
    }
}
