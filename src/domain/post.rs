//! Post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{User, UserResponse};
use super::values::Content;

/// A post authored by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: Content,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replace the body and bump `updated_at`.
    pub fn rewrite(&mut self, content: Content) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// Values for a post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub content: Content,
}

/// A post joined with its author, as listed on the timeline.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

/// Post as presented to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    #[schema(example = "hello")]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            content: post.content.into_string(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Timeline entry as presented to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimelineEntryResponse {
    pub post: PostResponse,
    pub author: UserResponse,
}

impl From<PostWithAuthor> for TimelineEntryResponse {
    fn from(entry: PostWithAuthor) -> Self {
        Self {
            post: entry.post.into(),
            author: entry.author.into(),
        }
    }
}
