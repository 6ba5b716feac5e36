//! Convenience result type alias for FanDreams.

use crate::error::AppError;

/// A specialized `Result` type for FanDreams operations.
pub type AppResult<T> = Result<T, AppError>;
