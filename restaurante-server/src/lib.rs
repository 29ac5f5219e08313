//! Restaurante Server - restaurant back-office REST API
//!
//! Inventory (`alimento`), orders (`comanda`) and expenses (`despesa`) over
//! an embedded SQLite store.
//!
//! ```text
//! restaurante-server/src/
//! ├── core/          # config, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # business rules, one service per entity
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── money.rs       # fixed-point money helpers
//! └── utils/         # errors, extractors, validation, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod money;
pub mod services;
pub mod utils;

pub use crate::core::{Config, Server, ServerState, build_router};
pub use db::DbService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;
