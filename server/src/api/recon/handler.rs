//! Reconciliations API Handlers

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::query::{Filter, PagedQuery, PageParams};
use crate::utils::{AppError, AppResult, PageResponse};

const RECON_FIELDS: &[&str] = &[
    "id",
    "recon_month",
    "recon_year",
    "total_income",
    "total_expenses",
    "total_reconciled",
    "created_by",
    "updated_by",
    "created_at",
    "updated_at",
];

#[derive(Debug, Deserialize)]
pub struct ReconListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub recon_month: Option<i64>,
    pub recon_year: Option<i64>,
}

/// GET /api/recon - paginated reconciliations, filterable by month and year
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ReconListQuery>,
) -> AppResult<Json<PageResponse<Value>>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10));
    let result = PagedQuery::new("reconciliations", RECON_FIELDS)
        .filter_opt(params.recon_month.map(|m| Filter::eq("recon_month", m)))
        .filter_opt(params.recon_year.map(|y| Filter::eq("recon_year", y)))
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}
