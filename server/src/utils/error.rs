//! Unified Error Handling
//!
//! Provides the application error type and the response envelope shared by
//! every endpoint:
//!
//! ```json
//! {
//!   "success": true,
//!   "data": { ... },
//!   "error": false,
//!   "message": "Order created successfully."
//! }
//! ```
//!
//! HTTP status codes mirror the envelope but never replace it; clients key
//! off `success`/`error` first.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response payload (null on error)
    pub data: Option<T>,
    /// Error flag (inverse of success, kept for client compatibility)
    pub error: bool,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: false,
            message: None,
        }
    }

    /// Successful response with data and a message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: false,
            message: Some(message.into()),
        }
    }
}

/// Paginated response envelope for list endpoints
///
/// `total_count` is the number of documents matching the filter before
/// pagination, not the size of the returned slice.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    pub error: bool,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(data: Vec<T>, total_count: u64) -> Self {
        Self {
            success: true,
            data,
            total_count,
            error: false,
        }
    }
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken(String),

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Update produced an empty change set. Reported distinctly from
    /// validation so the audit trail stays meaningful: no history entry is
    /// ever appended for a mutation that changed nothing.
    #[error("No changes made.")]
    NoChanges,

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Please login first".to_string())
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // No-op update (400)
            AppError::NoChanges => (StatusCode::BAD_REQUEST, "No changes made.".to_string()),

            // Database errors (500): logged for operators, generic to clients
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: true,
            message: Some(message),
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified message to prevent email enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid email or password".to_string())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Create a successful response with a message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok_with_message(data, message))
}
