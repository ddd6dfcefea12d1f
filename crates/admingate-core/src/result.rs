//! Convenience result type alias for AdminGate.

use crate::error::AppError;

/// A specialized `Result` type for AdminGate operations.
pub type AppResult<T> = Result<T, AppError>;
