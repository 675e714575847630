//! Auth API Handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{UserPublic, UserStatus};
use crate::db::repository::UserRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ValidJson, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/login - verify credentials and issue a JWT
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let repo = UserRepository::new(state.get_db());

    // One failure message for unknown email and wrong password alike
    let user = repo
        .find_by_email(&payload.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.verify_password(&payload.password) {
        return Err(AppError::invalid_credentials());
    }

    if user.status != UserStatus::Active {
        return Err(AppError::validation("Account is not active"));
    }

    let user_id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let token = state
        .jwt_service
        .generate_token(&user_id, &user.email, &user.display_name(), user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    repo.touch_last_login(&user.email)
        .await
        .map_err(AppError::from)?;

    tracing::info!(email = %user.email, "User logged in");

    Ok(ok_with_message(
        LoginResponse {
            token,
            user: user.into(),
        },
        "Login successful.",
    ))
}
