//! Synchronous token codec on the RustCrypto `hmac` crate.
//!
//! Used on the server side (login and refresh handlers, CLI).

use hmac::{Hmac, Mac};
use sha2::Sha256;

use admingate_core::error::AppError;

use super::payload::SessionPayload;
use super::{Verification, join_token, split_token};
use crate::compare::constant_time_eq;
use crate::secret::SessionSecret;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `payload` under `secret`.
pub fn signature_hex(payload: &str, secret: &SessionSecret) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.expose())
        .map_err(|e| AppError::internal(format!("HMAC key rejected: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs `payload`, producing `<payload>.<signatureHex>`.
pub fn sign(payload: &str, secret: &SessionSecret) -> Result<String, AppError> {
    if payload.is_empty() {
        return Err(AppError::validation("token payload must not be empty"));
    }
    let signature = signature_hex(payload, secret)?;
    Ok(join_token(payload, &signature))
}

/// Issues a token for an admin session starting at `now_ms`.
pub fn issue_admin_token(secret: &SessionSecret, now_ms: i64) -> Result<String, AppError> {
    sign(&SessionPayload::admin(now_ms).encode(), secret)
}

/// Checks a token's signature. Never fails: malformed input is simply invalid.
pub fn verify(token: &str, secret: &SessionSecret) -> Verification {
    let Some((payload, signature)) = split_token(token) else {
        return Verification::rejected();
    };
    let Ok(expected) = signature_hex(payload, secret) else {
        return Verification::rejected();
    };
    if constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
        Verification::accepted(payload)
    } else {
        Verification::rejected()
    }
}
