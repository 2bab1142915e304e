//! Convenience result type alias for Hookchain.

use crate::error::AppError;

/// A specialized `Result` type for Hookchain operations.
///
/// Hook functions, wrapped core functions, and plugin lifecycle callbacks
/// all return this type.
pub type AppResult<T> = Result<T, AppError>;
