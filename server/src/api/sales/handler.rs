//! Sales API Handlers

use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::core::ServerState;
use crate::query::{JoinSpec, PagedQuery, PageParams};
use crate::utils::{AppError, AppResult, PageResponse};

const SALE_FIELDS: &[&str] = &[
    "id",
    "order_number",
    "customer_id",
    "items",
    "total_amount",
    "payment_status",
    "order_status",
    "created_at",
    "updated_at",
];

const CUSTOMER_JOIN: JoinSpec = JoinSpec {
    foreign_table: "customer_data",
    local_field: "customer_id",
    alias: "customer_info",
    fields: &["customer_name", "contact_number", "email"],
};

/// GET /api/sales - paginated list with joined customer info
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<PageResponse<Value>>> {
    let result = PagedQuery::new("sales_data", SALE_FIELDS)
        .join(CUSTOMER_JOIN)
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}
