//! Warehouses API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/warehouses", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/status", get(handler::status_lov))
        .route("/lov", get(handler::id_lov))
}
