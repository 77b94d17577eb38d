//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
///
/// `roles` holds the global system-role tags (see
/// [`crate::models::SystemRole`] for the tags this client interprets). The
/// field is optional because the backend omits it on partially-loaded user
/// payloads; absence means no elevated roles, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// System-role tags as a slice, if the user object carries them
    pub fn role_tags(&self) -> Option<&[String]> {
        self.roles.as_deref()
    }
}
