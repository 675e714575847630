//! Dashboard API Handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::ServerState;
use crate::db::models::WarehouseStatus;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

/// Stock figures per warehouse, keyed by the business identifier
#[derive(Debug, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub warehouse_id: String,
    #[serde(rename(serialize = "currentStock"))]
    pub current_stock: i64,
    pub capacity: i64,
    pub status: WarehouseStatus,
}

/// Entity counts plus the per-warehouse stock summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_count: u64,
    pub warehouse_count: u64,
    pub order_count: u64,
    pub customer_count: u64,
    pub ticket_count: u64,
    #[serde(rename = "warehouse_summary")]
    pub warehouse_summary: Vec<WarehouseStock>,
}

/// GET /api/dashboard - headline counts and warehouse utilization
pub async fn summary(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let db = &state.db;

    let summary = DashboardSummary {
        user_count: table_count(db, "user_data").await?,
        warehouse_count: table_count(db, "warehouses").await?,
        order_count: table_count(db, "orders").await?,
        customer_count: table_count(db, "customer_data").await?,
        ticket_count: table_count(db, "tickets").await?,
        warehouse_summary: warehouse_stock(db).await?,
    };

    Ok(ok(summary))
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

async fn table_count(db: &Surreal<Db>, table: &str) -> AppResult<u64> {
    let mut result = db
        .query(format!("SELECT count() AS total FROM {table} GROUP ALL"))
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let rows: Vec<CountRow> = result
        .take(0)
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(rows.first().map(|r| r.total).unwrap_or(0))
}

async fn warehouse_stock(db: &Surreal<Db>) -> AppResult<Vec<WarehouseStock>> {
    let mut result = db
        .query(
            "SELECT warehouse_id, current_stock, capacity, status \
             FROM warehouses ORDER BY warehouse_id",
        )
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    result
        .take(0)
        .map_err(|e| AppError::database(e.to_string()))
}
