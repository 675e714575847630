//! Authentication middleware
//!
//! Axum middleware enforcing JWT authentication on the API surface.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid JWT on protected routes.
///
/// Extracts and validates the token from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into request extensions.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/auth/login`
/// - `/api/health`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route = path == "/api/auth/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", uri = %req.uri(), error = %e, "Authentication failed");

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
