use thiserror::Error;

use crate::utils::AppError;

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup failed: {0}")]
    Startup(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
