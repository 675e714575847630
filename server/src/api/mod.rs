//! API Route Modules
//!
//! One module per resource, each with a `mod.rs` router and a `handler.rs`:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login and registration
//! - [`dashboard`] - headline counts and warehouse utilization
//! - [`orders`] - order CRUD, status transitions, order-form LOVs
//! - [`tickets`] - ticket CRUD with audit history
//! - [`sales`] - sales reporting
//! - [`recon`] - monthly reconciliation reporting
//! - [`warehouses`] - warehouse management
//! - [`customers`] - customer CRUD
//! - [`users`] - user management
//! - [`inventory`] - inventory items

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod recon;
pub mod sales;
pub mod tickets;
pub mod users;
pub mod warehouses;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router.
///
/// Every route sits behind [`require_auth`]; the middleware itself lets the
/// public routes (login, health, CORS preflight) through.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(tickets::router())
        .merge(sales::router())
        .merge(recon::router())
        .merge(warehouses::router())
        .merge(customers::router())
        .merge(users::router())
        .merge(inventory::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .with_state(state)
}
