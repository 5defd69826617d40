//! Follow relation between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub const SELF_FOLLOW_MESSAGE: &str = "You cannot follow yourself";
pub const ALREADY_FOLLOWING_MESSAGE: &str = "You are already following this user";
pub const NOT_FOLLOWING_MESSAGE: &str = "Follow relationship does not exist";

/// `follower_id` follows `following_id`. Never updated, only deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A follow relation that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFollow {
    pub follower_id: Uuid,
    pub following_id: Uuid,
}

impl NewFollow {
    /// Fails when a user tries to follow themselves.
    pub fn new(follower_id: Uuid, following_id: Uuid) -> AppResult<Self> {
        if follower_id == following_id {
            return Err(AppError::validation(SELF_FOLLOW_MESSAGE));
        }
        Ok(Self {
            follower_id,
            following_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_follow_is_rejected() {
        let id = Uuid::new_v4();
        let err = NewFollow::new(id, id).unwrap_err();
        assert_eq!(err.user_message(), SELF_FOLLOW_MESSAGE);
    }

    #[test]
    fn distinct_users_can_follow() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let follow = NewFollow::new(a, b).unwrap();
        assert_eq!(follow.follower_id, a);
        assert_eq!(follow.following_id, b);
    }
}
