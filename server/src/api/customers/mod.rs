//! Customers API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::remove))
}
