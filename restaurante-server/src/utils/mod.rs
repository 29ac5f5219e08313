//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ApiJson`] / [`ApiPath`] - extractors with structured rejections
//! - logging and input validation helpers

pub mod error;
pub mod extract;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use extract::{ApiJson, ApiPath};
