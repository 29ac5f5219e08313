//! Repository Module
//!
//! One module of free functions per table. Every function takes a
//! `&mut SqliteConnection` so callers decide whether it runs on a plain
//! pooled connection or inside a transaction (`&mut tx`).

pub mod alimento;
pub mod comanda;
pub mod despesa;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// SQLite primary result codes that mean "try again later"
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepoError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => RepoError::Duplicate(db_err.message().to_string()),
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => RepoError::Validation(db_err.message().to_string()),
                _ if is_busy(db_err.code().as_deref()) => {
                    RepoError::Unavailable(db_err.message().to_string())
                }
                _ => RepoError::Database(db_err.message().to_string()),
            },
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Extended result codes keep the primary code in the low byte
fn is_busy(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
        .unwrap_or(false)
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
