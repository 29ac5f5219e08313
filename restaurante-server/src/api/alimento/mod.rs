//! Alimento API module
//!
//! Name-keyed routes are kept for existing clients; the `/id/{id}` routes
//! address the same records by their immutable id.

mod handler;

use axum::Router;
use axum::routing::{get, post, put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/alimento", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/todos", get(handler::list))
        .route("/varios", post(handler::create_multiple))
        .route(
            "/id/{id}",
            get(handler::get_by_id)
                .put(handler::update_by_id)
                .delete(handler::delete_by_id),
        )
        .route("/nome/{nome}", get(handler::get_by_nome))
        .route("/quantidade/{nome}", put(handler::update_quantidade))
        .route("/{nome}", put(handler::update).delete(handler::delete))
}
