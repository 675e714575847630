//! Warehouses API Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{Warehouse, WarehouseCreate, WarehouseStatus};
use crate::db::repository::WarehouseRepository;
use crate::db::repository::warehouse::WarehouseLov;
use crate::query::{Filter, JoinSpec, PagedQuery, PageParams};
use crate::utils::{ApiResponse, AppError, AppResult, PageResponse, ValidJson, ok, ok_with_message};

const WAREHOUSE_FIELDS: &[&str] = &[
    "id",
    "warehouse_id",
    "name",
    "location",
    "capacity",
    "current_stock",
    "manager_id",
    "contact_number",
    "status",
    "created_at",
    "updated_at",
];

/// Manager identity joined onto each warehouse row
const MANAGER_JOIN: JoinSpec = JoinSpec {
    foreign_table: "user_data",
    local_field: "manager_id",
    alias: "manager_info",
    fields: &["first_name", "last_name", "email"],
};

#[derive(Debug, Deserialize)]
pub struct WarehouseListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<WarehouseStatus>,
}

/// GET /api/warehouses - paginated list with joined manager info
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<WarehouseListQuery>,
) -> AppResult<Json<PageResponse<Value>>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10));
    let result = PagedQuery::new("warehouses", WAREHOUSE_FIELDS)
        .filter_opt(params.status.map(|s| Filter::eq("status", s)))
        .join(MANAGER_JOIN)
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}

/// POST /api/warehouses - create a warehouse
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<WarehouseCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Warehouse>>)> {
    if payload.warehouse_id.trim().is_empty()
        || payload.name.trim().is_empty()
        || payload.location.trim().is_empty()
        || payload.manager_id.trim().is_empty()
    {
        return Err(AppError::validation("All fields are required."));
    }

    let repo = WarehouseRepository::new(state.get_db());
    let created = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(warehouse_id = %created.warehouse_id, "Warehouse created");

    Ok((
        StatusCode::CREATED,
        ok_with_message(created, "Warehouse created successfully."),
    ))
}

/// GET /api/warehouses/status - the status list of values
pub async fn status_lov() -> Json<ApiResponse<Vec<&'static str>>> {
    ok(WarehouseStatus::ALL.iter().map(|s| s.as_str()).collect())
}

/// GET /api/warehouses/lov - business identifiers only
pub async fn id_lov(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<WarehouseLov>>>> {
    let lov = WarehouseRepository::new(state.get_db())
        .find_lov()
        .await
        .map_err(AppError::from)?;
    Ok(ok(lov))
}
