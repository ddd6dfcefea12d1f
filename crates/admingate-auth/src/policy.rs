//! Session policy: role and age rules applied to a verified payload.

use std::fmt;

use chrono::Utc;

use crate::token::payload::SessionPayload;

/// Maximum session lifetime: 8 hours.
pub const MAX_SESSION_AGE_MS: i64 = 8 * 60 * 60 * 1000;

/// Why a verified payload was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Missing `|` or a timestamp that is not a base-10 integer.
    MalformedPayload,
    /// Role other than exactly `"admin"`.
    WrongRole,
    /// Issued more than the maximum age ago.
    Expired,
    /// Issued in the future. Treated as tampering rather than clock drift.
    IssuedInFuture,
}

impl Denial {
    /// Short tag for structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedPayload => "malformed_payload",
            Self::WrongRole => "wrong_role",
            Self::Expired => "expired",
            Self::IssuedInFuture => "issued_in_future",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authorized admin session, reconstructed from its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Always `"admin"`.
    pub role: String,
    /// Issue time in epoch milliseconds.
    pub issued_at_ms: i64,
    /// Time after which the session is no longer authorized.
    pub expires_at_ms: i64,
}

/// Role and expiry rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    max_age_ms: i64,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::new(MAX_SESSION_AGE_MS)
    }
}

impl SessionPolicy {
    /// Policy with the given maximum age in milliseconds.
    pub fn new(max_age_ms: i64) -> Self {
        Self { max_age_ms }
    }

    /// Maximum session age in milliseconds.
    pub fn max_age_ms(&self) -> i64 {
        self.max_age_ms
    }

    /// Checks a parsed payload at time `now_ms`.
    ///
    /// Passes when the role is exactly `"admin"` and
    /// `0 <= now_ms - issued_at_ms <= max_age_ms`.
    pub fn check(&self, payload: &SessionPayload, now_ms: i64) -> Result<AdminSession, Denial> {
        if !payload.is_admin() {
            return Err(Denial::WrongRole);
        }

        let elapsed = now_ms
            .checked_sub(payload.issued_at_ms)
            .ok_or(Denial::Expired)?;
        if elapsed < 0 {
            return Err(Denial::IssuedInFuture);
        }
        if elapsed > self.max_age_ms {
            return Err(Denial::Expired);
        }

        Ok(AdminSession {
            role: payload.role.clone(),
            issued_at_ms: payload.issued_at_ms,
            expires_at_ms: payload.issued_at_ms.saturating_add(self.max_age_ms),
        })
    }

    /// Parses a raw verified payload and checks it.
    pub fn check_raw(&self, raw: &str, now_ms: i64) -> Result<AdminSession, Denial> {
        let payload = SessionPayload::parse(raw).ok_or(Denial::MalformedPayload)?;
        self.check(&payload, now_ms)
    }
}

/// Decides whether a verified raw payload grants admin access at `now_ms`.
///
/// Fails closed on any parse problem.
pub fn authorize(payload: &str, now_ms: i64, max_age_ms: i64) -> bool {
    SessionPolicy::new(max_age_ms)
        .check_raw(payload, now_ms)
        .is_ok()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
