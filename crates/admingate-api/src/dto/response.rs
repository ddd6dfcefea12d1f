//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use admingate_auth::AdminSession;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Issued session summary, returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIssuedResponse {
    /// When the new session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Current session, as seen by the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session role (always `admin`).
    pub role: String,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

impl From<&AdminSession> for SessionResponse {
    fn from(session: &AdminSession) -> Self {
        Self {
            role: session.role.clone(),
            issued_at: millis_to_datetime(session.issued_at_ms),
            expires_at: millis_to_datetime(session.expires_at_ms),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Converts epoch milliseconds, clamping out-of-range values to the epoch.
pub fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
