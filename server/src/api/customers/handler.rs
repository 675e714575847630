//! Customers API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::db::repository::CustomerRepository;
use crate::query::{Filter, PagedQuery, PageParams};
use crate::utils::{ApiResponse, AppError, AppResult, PageResponse, ValidJson, ok_with_message};

const CUSTOMER_FIELDS: &[&str] = &[
    "id",
    "customer_name",
    "contact_number",
    "email",
    "address",
    "city",
    "state",
    "zip_code",
    "country",
    "company_name",
    "customer_type",
    "credit_limit",
    "balance_due",
    "notes",
    "created_at",
    "updated_at",
];

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/customers - paginated list, case-insensitive name search
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CustomerListQuery>,
) -> AppResult<Json<PageResponse<Value>>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10));
    let search = params.search.filter(|s| !s.trim().is_empty());

    let result = PagedQuery::new("customer_data", CUSTOMER_FIELDS)
        .filter_opt(search.map(|s| Filter::contains("customer_name", s)))
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}

/// POST /api/customers - create a customer
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<CustomerCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    if payload.customer_name.trim().is_empty()
        || payload.contact_number.trim().is_empty()
        || payload.email.trim().is_empty()
    {
        return Err(AppError::validation("All fields are required."));
    }

    let repo = CustomerRepository::new(state.get_db());
    let created = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(email = %created.email, "Customer created");

    Ok((
        StatusCode::CREATED,
        ok_with_message(created, "Customer created successfully."),
    ))
}

/// PUT /api/customers/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<CustomerUpdate>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let repo = CustomerRepository::new(state.get_db());
    let updated = repo.update(&id, payload).await.map_err(AppError::from)?;

    Ok(ok_with_message(updated, "Customer updated successfully."))
}

/// DELETE /api/customers/{id}
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = CustomerRepository::new(state.get_db());
    let deleted = repo.delete(&id).await.map_err(AppError::from)?;

    if !deleted {
        return Err(AppError::not_found("Customer not found."));
    }

    Ok(ok_with_message((), "Customer deleted successfully."))
}
