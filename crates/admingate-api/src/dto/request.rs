//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Admin identifier.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Admin credential.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Query string of the login page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginPageQuery {
    /// Path to return to after a successful login.
    pub next: Option<String>,
}
