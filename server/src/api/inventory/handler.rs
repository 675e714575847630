//! Inventory API Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::core::ServerState;
use crate::db::models::{InventoryItem, InventoryItemCreate};
use crate::db::repository::InventoryRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ValidJson, ok, ok_with_message};

/// GET /api/inventory - all items
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    let items = InventoryRepository::new(state.get_db())
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(ok(items))
}

/// POST /api/inventory - create an item
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<InventoryItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<InventoryItem>>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("All fields are required."));
    }

    let created = InventoryRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(created, "Inventory item created successfully."),
    ))
}
