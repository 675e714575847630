//! Orders API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus, StatusUpdate};
use crate::db::repository::{
    CustomerRepository, InventoryRepository, OrderRepository, record_id,
};
use crate::db::repository::customer::CustomerLov;
use crate::db::repository::inventory::InventoryLov;
use crate::notify::{NotificationRequest, templates};
use crate::query::{Filter, JoinSpec, PagedQuery, PageParams};
use crate::utils::{ApiResponse, AppError, AppResult, PageResponse, ValidJson, ok, ok_with_message};

/// Fields exposed on order list/detail views
const ORDER_FIELDS: &[&str] = &[
    "id",
    "order_id",
    "customer_id",
    "order_date",
    "shipping_date",
    "status",
    "total_amount",
    "tax_amount",
    "net_amount",
    "payment_method",
    "payment_status",
    "payment_date",
    "shipping_address",
    "billing_address",
    "items",
    "created_by",
    "updated_by",
    "notes",
];

/// Customer fields joined onto each order row
const CUSTOMER_JOIN: JoinSpec = JoinSpec {
    foreign_table: "customer_data",
    local_field: "customer_id",
    alias: "customer_info",
    fields: &["customer_name", "contact_number", "email"],
};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - paginated list with joined customer info
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<OrderListQuery>,
) -> AppResult<Json<PageResponse<Value>>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10));
    let result = PagedQuery::new("orders", ORDER_FIELDS)
        .filter_opt(params.status.map(|s| Filter::eq("status", s)))
        .join(CUSTOMER_JOIN)
        .run(&state.db, page)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PageResponse::new(result.data, result.total_count)))
}

/// POST /api/orders - create an order and notify the customer
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    validate_create(&payload)?;

    let customer_id = record_id("customer_data", &payload.customer_id)?;
    let items = payload
        .items
        .iter()
        .map(|item| {
            Ok(OrderItem {
                item_id: record_id("inventory", &item.item_id)?,
                item_name: item.item_name.clone(),
                quantity: item.quantity,
                price: item.price,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let order = Order {
        id: None,
        order_id: 0, // assigned by the repository
        customer_id,
        order_date: payload.order_date,
        shipping_date: None,
        status: OrderStatus::Pending,
        total_amount: payload.total_amount,
        tax_amount: payload.tax_amount,
        net_amount: payload.net_amount,
        payment_method: Some(payload.payment_method),
        payment_status: Some(payload.payment_status),
        payment_date: None,
        shipping_address: payload.shipping_address.clone(),
        billing_address: payload.billing_address.clone(),
        items,
        created_by: user.name.clone(),
        updated_by: user.name,
        notes: None,
    };

    let repo = OrderRepository::new(state.get_db());
    let created = repo
        .create(order, &state.id_generator)
        .await
        .map_err(AppError::from)?;

    let (subject, body) = templates::order_status_message(created.order_id, created.status);
    state.notify.enqueue(NotificationRequest {
        recipient: payload.customer_email,
        subject,
        body,
    });

    tracing::info!(order_id = created.order_id, "Order created");

    Ok((
        StatusCode::CREATED,
        ok_with_message(created, "Order created successfully."),
    ))
}

fn validate_create(payload: &OrderCreate) -> AppResult<()> {
    if payload.customer_id.trim().is_empty()
        || payload.customer_name.trim().is_empty()
        || payload.customer_number.trim().is_empty()
        || payload.customer_email.trim().is_empty()
        || payload.shipping_address.trim().is_empty()
        || payload.billing_address.trim().is_empty()
        || payload.items.is_empty()
    {
        return Err(AppError::validation("All fields are required."));
    }
    Ok(())
}

/// GET /api/orders/status - the status list of values
pub async fn status_lov() -> Json<ApiResponse<Vec<&'static str>>> {
    ok(OrderStatus::ALL.iter().map(|s| s.as_str()).collect())
}

#[derive(Debug, Serialize)]
pub struct OrderFormLov {
    pub customers: Vec<CustomerLov>,
    pub items: Vec<InventoryLov>,
}

/// GET /api/orders/customers-items - order form lists of values
pub async fn customers_items(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<OrderFormLov>>> {
    let customers = CustomerRepository::new(state.get_db())
        .find_lov()
        .await
        .map_err(AppError::from)?;
    let items = InventoryRepository::new(state.get_db())
        .find_lov()
        .await
        .map_err(AppError::from)?;

    Ok(ok(OrderFormLov { customers, items }))
}

/// GET /api/orders/{order_id} - fetch by human id with joined customer info
pub async fn get_by_order_id(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let order = PagedQuery::new("orders", ORDER_FIELDS)
        .filter(Filter::eq("order_id", order_id))
        .join(CUSTOMER_JOIN)
        .run_single(&state.db)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order not found."))?;

    Ok(ok(order))
}

/// PUT /api/orders/{order_id}/status - transition the order status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
    ValidJson(payload): ValidJson<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let updated = repo
        .update_status(order_id, payload.status)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order not found."))?;

    // Notification failure must never fail the update
    match CustomerRepository::new(state.get_db())
        .find_by_id(&updated.customer_id.to_string())
        .await
    {
        Ok(Some(customer)) => {
            let (subject, body) = templates::order_status_message(order_id, payload.status);
            state.notify.enqueue(NotificationRequest {
                recipient: customer.email,
                subject,
                body,
            });
        }
        Ok(None) => {
            tracing::warn!(order_id, "Customer missing, skipping status notification");
        }
        Err(e) => {
            tracing::error!(order_id, error = %e, "Customer lookup failed, skipping notification");
        }
    }

    tracing::info!(order_id, status = %payload.status, "Order status updated");

    Ok(ok_with_message(updated, "Order status updated successfully."))
}
