//! Request body extraction
//!
//! Wraps axum's `Json` so a malformed or mistyped body comes back as a 400
//! inside the standard response envelope instead of axum's plain-text 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::utils::AppError;

/// JSON request body; rejections surface as [`AppError::Validation`]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}
