//! Error handling
//!
//! Re-exports the unified error system from `shared::error` and bridges
//! repository errors into it, so services can use `?` on repository calls.
//!
//! ```ignore
//! let alimento = repository::alimento::find_by_id(&mut conn, id)
//!     .await?
//!     .ok_or_else(|| {
//!         AppError::with_message(ErrorCode::AlimentoNotFound, format!("Alimento {id} not found"))
//!     })?;
//! ```

use crate::db::repository::RepoError;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Store unavailable");
                AppError::store_unavailable(msg)
            }
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
