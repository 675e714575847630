//! Users API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users", get(handler::list))
        .route("/api/users", post(handler::create))
}
