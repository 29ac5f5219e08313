//! API routing module
//!
//! - [`health`] - health check
//! - [`alimento`] - inventory items
//! - [`comanda`] - orders
//! - [`despesa`] - expenses

pub mod alimento;
pub mod comanda;
pub mod despesa;
pub mod health;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(alimento::router())
        .merge(comanda::router())
        .merge(despesa::router())
}
