//! Shared types for the restaurant back-office
//!
//! Models exchanged over the HTTP API and the unified error system used by
//! the server crate.

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
