//! Session tokens: `<payload>.<signatureHex>`.
//!
//! The signature is the lowercase hex HMAC-SHA256 of the payload. Two
//! independent codecs produce and check it: [`sync`] on top of the RustCrypto
//! `hmac` crate, and [`edge`] on top of an async subtle-crypto style
//! interface. Both must yield identical tokens and identical verification
//! outcomes for every input.

pub mod edge;
pub mod payload;
pub mod sync;

pub use edge::{EdgeCrypto, EdgeTokenCodec, Sha256Subtle};
pub use payload::{ADMIN_ROLE, PAYLOAD_SEPARATOR, SessionPayload};

/// Separator between payload and signature. Tokens are split on its last
/// occurrence.
pub const TOKEN_SEPARATOR: char = '.';

/// Result of checking a token's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the signature matched.
    pub valid: bool,
    /// The signed payload; present only when `valid` is true.
    pub payload: Option<String>,
}

impl Verification {
    pub(crate) fn accepted(payload: &str) -> Self {
        Self {
            valid: true,
            payload: Some(payload.to_string()),
        }
    }

    pub(crate) fn rejected() -> Self {
        Self {
            valid: false,
            payload: None,
        }
    }

    /// Consumes the verification, yielding the payload if it was valid.
    pub fn into_payload(self) -> Option<String> {
        if self.valid { self.payload } else { None }
    }
}

/// Splits a token into `(payload, signature)` at the last separator.
///
/// Returns `None` for an empty token or one without a separator.
pub fn split_token(token: &str) -> Option<(&str, &str)> {
    if token.is_empty() {
        return None;
    }
    token.rsplit_once(TOKEN_SEPARATOR)
}

/// Joins a payload and its hex signature into a token.
pub(crate) fn join_token(payload: &str, signature_hex: &str) -> String {
    let mut token = String::with_capacity(payload.len() + 1 + signature_hex.len());
    token.push_str(payload);
    token.push(TOKEN_SEPARATOR);
    token.push_str(signature_hex);
    token
}
