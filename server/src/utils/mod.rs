//! Utility Module
//!
//! Shared infrastructure: error types, the response envelope, logging and
//! time helpers.

pub mod error;
pub mod extract;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{ApiResponse, AppError, PageResponse, ok, ok_with_message};
pub use extract::ValidJson;
pub use result::AppResult;
