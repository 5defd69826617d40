//! User profile entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::values::{DisplayName, Email};

pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken";

/// User profile. Authentication data lives in [`super::Credential`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Email,
    pub display_name: DisplayName,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Rewrite the editable profile fields. The avatar is kept as is.
    pub fn update_profile(&mut self, display_name: DisplayName, bio: Option<String>) {
        self.display_name = display_name;
        self.bio = bio.filter(|b| !b.trim().is_empty());
        self.updated_at = Utc::now();
    }
}

/// Values for a user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub display_name: DisplayName,
    pub bio: Option<String>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: Email,
        display_name: DisplayName,
        bio: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email,
            display_name,
            bio: bio.filter(|b| !b.trim().is_empty()),
        }
    }
}

/// User as presented to clients (safe to return)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login name
    #[schema(example = "alice")]
    pub username: String,
    /// Display name, or the placeholder when unset
    #[schema(example = "Alice")]
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.as_str().to_string(),
            username: user.username,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}
