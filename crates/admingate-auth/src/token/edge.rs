//! Asynchronous token codec for edge-style runtimes.
//!
//! Edge runtimes expose HMAC through an async subtle-crypto interface: a raw
//! key is imported once into an opaque handle, then each signature is an
//! awaited call. [`EdgeCrypto`] models that interface. [`Sha256Subtle`]
//! implements it on `hmac::SimpleHmac`, a separate construction from the
//! block-level `Hmac` used by [`super::sync`].

use async_trait::async_trait;
use hmac::{Mac, SimpleHmac};
use sha2::Sha256;

use admingate_core::error::AppError;

use super::{Verification, join_token, split_token};
use crate::compare::constant_time_eq;
use crate::secret::SessionSecret;

type SimpleHmacSha256 = SimpleHmac<Sha256>;

/// Async HMAC-SHA256 primitive in the shape of a subtle-crypto API.
#[async_trait]
pub trait EdgeCrypto: Send + Sync {
    /// Opaque imported key.
    type Key: Send + Sync;

    /// Imports raw key bytes for HMAC-SHA256 signing.
    async fn import_key(&self, raw: &[u8]) -> Result<Self::Key, AppError>;

    /// Computes the HMAC-SHA256 tag of `data`.
    async fn sign(&self, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>, AppError>;
}

/// Default [`EdgeCrypto`] backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Subtle;

/// Imported HMAC key: a MAC already keyed, cloned per signature.
#[derive(Clone)]
pub struct SubtleKey {
    mac: SimpleHmacSha256,
}

impl std::fmt::Debug for SubtleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubtleKey(<redacted>)")
    }
}

#[async_trait]
impl EdgeCrypto for Sha256Subtle {
    type Key = SubtleKey;

    async fn import_key(&self, raw: &[u8]) -> Result<SubtleKey, AppError> {
        if raw.is_empty() {
            return Err(AppError::configuration("HMAC key must not be empty"));
        }
        let mac = SimpleHmacSha256::new_from_slice(raw)
            .map_err(|e| AppError::configuration(format!("HMAC key rejected: {e}")))?;
        Ok(SubtleKey { mac })
    }

    async fn sign(&self, key: &SubtleKey, data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = key.mac.clone();
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Token signer and verifier over an [`EdgeCrypto`] backend.
///
/// The key is imported once at construction and reused for every call.
pub struct EdgeTokenCodec<C: EdgeCrypto = Sha256Subtle> {
    crypto: C,
    key: C::Key,
}

impl<C: EdgeCrypto> std::fmt::Debug for EdgeTokenCodec<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeTokenCodec").finish_non_exhaustive()
    }
}

impl EdgeTokenCodec<Sha256Subtle> {
    /// Codec on the default pure-Rust backend.
    pub async fn from_secret(secret: &SessionSecret) -> Result<Self, AppError> {
        Self::new(Sha256Subtle, secret).await
    }
}

impl<C: EdgeCrypto> EdgeTokenCodec<C> {
    /// Imports `secret` into `crypto` and returns a ready codec.
    pub async fn new(crypto: C, secret: &SessionSecret) -> Result<Self, AppError> {
        let key = crypto.import_key(secret.expose()).await?;
        Ok(Self { crypto, key })
    }

    /// Lowercase hex HMAC-SHA256 of `payload`.
    pub async fn signature_hex(&self, payload: &str) -> Result<String, AppError> {
        let tag = self.crypto.sign(&self.key, payload.as_bytes()).await?;
        Ok(hex::encode(tag))
    }

    /// Signs `payload`, producing `<payload>.<signatureHex>`.
    pub async fn sign(&self, payload: &str) -> Result<String, AppError> {
        if payload.is_empty() {
            return Err(AppError::validation("token payload must not be empty"));
        }
        let signature = self.signature_hex(payload).await?;
        Ok(join_token(payload, &signature))
    }

    /// Checks a token's signature. Never fails: malformed input is simply
    /// invalid.
    pub async fn verify(&self, token: &str) -> Verification {
        let Some((payload, signature)) = split_token(token) else {
            return Verification::rejected();
        };
        let Ok(expected) = self.signature_hex(payload).await else {
            return Verification::rejected();
        };
        if constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            Verification::accepted(payload)
        } else {
            Verification::rejected()
        }
    }
}

/// One-shot async signing: imports `secret`, then signs `payload`.
pub async fn sign(payload: &str, secret: &SessionSecret) -> Result<String, AppError> {
    EdgeTokenCodec::from_secret(secret).await?.sign(payload).await
}

/// One-shot async verification: imports `secret`, then verifies `token`.
pub async fn verify(token: &str, secret: &SessionSecret) -> Verification {
    match EdgeTokenCodec::from_secret(secret).await {
        Ok(codec) => codec.verify(token).await,
        Err(_) => Verification::rejected(),
    }
}
