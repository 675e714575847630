//! Result alias
//!
//! Shorthand for fallible handler and service code that reports [`AppError`].

use crate::AppError;

/// Result carrying the application error type.
///
/// Handlers return this so `?` converts storage and auth failures straight
/// into envelope responses.
pub type AppResult<T> = Result<T, AppError>;
