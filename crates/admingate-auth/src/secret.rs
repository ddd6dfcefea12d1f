//! The session signing secret.

use std::fmt;

use admingate_core::config::AuthConfig;
use admingate_core::error::AppError;

/// HMAC key shared by the signer and both verifiers.
///
/// Never empty. The bytes are not exposed through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    /// Wraps raw key bytes, rejecting an empty key.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AppError::configuration("session secret must not be empty"));
        }
        Ok(Self(bytes))
    }

    /// Builds the secret from the validated auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(config.session_secret.as_bytes())
    }

    /// Raw key bytes, for MAC computation only.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionSecret(<{} bytes redacted>)", self.0.len())
    }
}
