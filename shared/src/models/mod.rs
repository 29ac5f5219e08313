//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod alimento;
pub mod comanda;
pub mod despesa;

// Re-exports
pub use alimento::*;
pub use comanda::*;
pub use despesa::*;
