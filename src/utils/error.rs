//! Error types
//!
//! Only construction-time operations return errors across the crate
//! boundary. The selection and authorization layers never do: fetch
//! failures become store state and bad inputs resolve to the
//! least-privileged answer.

use thiserror::Error;

use crate::services::directory::DirectoryError;

/// Errors surfaced while building the application core
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Selection storage could not be opened
    #[error("Storage error: {0}")]
    Storage(String),

    /// Directory client could not be constructed
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result type alias for construction paths
pub type CoreResult<T> = Result<T, CoreError>;
