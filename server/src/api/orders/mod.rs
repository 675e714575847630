//! Orders API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // Literal segments are matched before the {order_id} capture
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/status", get(handler::status_lov))
        .route("/customers-items", get(handler::customers_items))
        .route("/{order_id}", get(handler::get_by_order_id))
        .route("/{order_id}/status", put(handler::update_status))
}
