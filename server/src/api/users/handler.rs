//! Users API Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{UserCreate, UserPublic};
use crate::db::repository::UserRepository;
use crate::query::{PagedQuery, PageParams};
use crate::utils::{ApiResponse, AppError, AppResult, PageResponse, ValidJson, ok_with_message};

/// Field allow-list; `hash_pass` is deliberately absent
const USER_FIELDS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "phone_number",
    "role",
    "status",
    "last_login",
    "created_at",
    "updated_at",
];

/// GET /api/users - paginated list, password hash never exposed
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Value>>> {
    let result = PagedQuery::new("user_data", USER_FIELDS)
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}

/// POST /api/users - create a user account
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<UserCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserPublic>>)> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::validation("All fields are required."));
    }

    let repo = UserRepository::new(state.get_db());
    let created = repo.create(payload).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(created.into(), "User created successfully."),
    ))
}
