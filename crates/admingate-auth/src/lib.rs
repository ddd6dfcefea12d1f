//! # admingate-auth
//!
//! Stateless admin session authentication for AdminGate.
//!
//! ## Modules
//!
//! - `secret`: the process-wide signing secret
//! - `compare`: constant-time byte comparison
//! - `token`: `<payload>.<hex hmac>` tokens, with a synchronous codec and an
//!   asynchronous edge-style codec that must agree bit-for-bit
//! - `policy`: role and expiry rules applied to a verified payload
//! - `gate`: per-request public/protected classification and allow/redirect

pub mod compare;
pub mod gate;
pub mod policy;
pub mod secret;
pub mod token;

pub use gate::{GateDecision, RouteClass, RouteGate};
pub use policy::{AdminSession, Denial, MAX_SESSION_AGE_MS, SessionPolicy};
pub use secret::SessionSecret;
pub use token::{EdgeTokenCodec, SessionPayload, Verification};
