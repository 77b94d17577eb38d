//! Directory service contract
//!
//! The directory is the remote REST service that owns organizations and
//! teams. The selection stores only ever read lists from it; creation and
//! deletion happen elsewhere in the application against the same API.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Organization, Team};

/// Errors from the directory collaborator
///
/// The selection stores never surface these to the user; they are logged
/// and collapsed into a fixed per-scope message.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory request timed out")]
    Timeout,

    #[error("failed to connect to the directory service")]
    Connect,

    #[error("directory service returned status {0}")]
    Status(u16),

    #[error("invalid directory response: {0}")]
    Decode(String),

    #[error("directory error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectoryError::Timeout
        } else if err.is_connect() {
            DirectoryError::Connect
        } else if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            DirectoryError::Status(status.as_u16())
        } else {
            DirectoryError::Other(err.to_string())
        }
    }
}

/// Read access to the organization/team directory
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// List the organizations visible to the current session
    async fn fetch_organizations(&self) -> Result<Vec<Organization>, DirectoryError>;

    /// List the teams of one organization
    async fn fetch_organization_teams(
        &self,
        organization_id: i64,
    ) -> Result<Vec<Team>, DirectoryError>;
}
