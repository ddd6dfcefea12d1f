//! # admingate-core
//!
//! Core crate for AdminGate. Contains the configuration schema and loader,
//! and the unified error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other AdminGate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
