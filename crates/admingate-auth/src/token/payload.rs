//! Typed view of the `<role>|<issuedAtEpochMillis>` payload.

use std::fmt;

/// Separator between role and issue time in the payload.
pub const PAYLOAD_SEPARATOR: char = '|';

/// The only role granted access to the admin area.
pub const ADMIN_ROLE: &str = "admin";

/// A parsed session payload.
///
/// The wire format stays a delimited string for compatibility with cookies
/// already issued; it is parsed once, right after verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    /// Free-form role tag.
    pub role: String,
    /// Issue time in milliseconds since the Unix epoch.
    pub issued_at_ms: i64,
}

impl SessionPayload {
    /// Payload for a freshly issued admin session.
    pub fn admin(issued_at_ms: i64) -> Self {
        Self {
            role: ADMIN_ROLE.to_string(),
            issued_at_ms,
        }
    }

    /// Parses `<role>|<issuedAt>`, splitting on the first `|`.
    ///
    /// Returns `None` when the separator is missing or the timestamp is not a
    /// base-10 integer.
    pub fn parse(raw: &str) -> Option<Self> {
        let (role, issued_at) = raw.split_once(PAYLOAD_SEPARATOR)?;
        let issued_at_ms = issued_at.parse::<i64>().ok()?;
        Some(Self {
            role: role.to_string(),
            issued_at_ms,
        })
    }

    /// Wire encoding of the payload.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Whether the role is exactly `"admin"`.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl fmt::Display for SessionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.role, PAYLOAD_SEPARATOR, self.issued_at_ms)
    }
}
