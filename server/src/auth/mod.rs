//! Authentication Module
//!
//! JWT authentication for the API surface:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
