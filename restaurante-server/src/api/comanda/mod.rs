//! Comanda API module
//!
//! Orders have no delete route; they are kept as history.

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/comanda", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/todos", get(handler::list))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
