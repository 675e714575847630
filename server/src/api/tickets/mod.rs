//! Tickets API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    // GET takes the human 6-digit id, PUT takes the internal record id;
    // both share the same capture segment
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/assignees", get(handler::assignees))
        .route("/{id}", get(handler::get_by_ticket_id).put(handler::update))
}
