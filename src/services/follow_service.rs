//! Follow service - follow graph mutations and queries.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{NewFollow, User, ALREADY_FOLLOWING_MESSAGE, NOT_FOLLOWING_MESSAGE};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait FollowService: Send + Sync {
    /// Fails on self-follow, unknown target, or an existing relation.
    async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()>;

    /// Fails when the relation does not exist.
    async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()>;

    async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool>;

    /// Users `user_id` follows. Ids that no longer resolve are skipped.
    async fn get_following_users(&self, user_id: Uuid) -> AppResult<Vec<User>>;

    /// Users following `user_id`. Ids that no longer resolve are skipped.
    async fn get_follower_users(&self, user_id: Uuid) -> AppResult<Vec<User>>;
}

pub struct FollowManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FollowManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn resolve_users(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        let users = self.uow.users();
        let lookups = ids.into_iter().map(|id| users.find_by_id(id)).collect();
        let resolved = parallel::join_all(lookups).await?;
        Ok(resolved.into_iter().flatten().collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> FollowService for FollowManager<U> {
    async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()> {
        let relation = NewFollow::new(follower_id, following_id)?;

        self.uow
            .transaction(move |ctx| async move {
                ctx.users()
                    .find_by_id(relation.following_id)
                    .await?
                    .ok_or_not_found("User")?;

                if ctx
                    .follows()
                    .exists(relation.follower_id, relation.following_id)
                    .await?
                {
                    return Err(AppError::validation(ALREADY_FOLLOWING_MESSAGE));
                }

                ctx.follows().create(relation).await
            })
            .await?;

        tracing::info!(follower_id = %follower_id, following_id = %following_id, "followed");
        Ok(())
    }

    async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| async move {
                let relation = ctx
                    .follows()
                    .find_by_pair(follower_id, following_id)
                    .await?
                    .ok_or_else(|| AppError::validation(NOT_FOLLOWING_MESSAGE))?;

                ctx.follows().delete_by_id(relation.id).await
            })
            .await?;

        tracing::info!(follower_id = %follower_id, following_id = %following_id, "unfollowed");
        Ok(())
    }

    async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        self.uow.follows().exists(follower_id, following_id).await
    }

    async fn get_following_users(&self, user_id: Uuid) -> AppResult<Vec<User>> {
        let ids = self
            .uow
            .follows()
            .find_by_follower_id(user_id)
            .await?
            .into_iter()
            .map(|follow| follow.following_id)
            .collect();

        self.resolve_users(ids).await
    }

    async fn get_follower_users(&self, user_id: Uuid) -> AppResult<Vec<User>> {
        let ids = self
            .uow
            .follows()
            .find_by_following_id(user_id)
            .await?
            .into_iter()
            .map(|follow| follow.follower_id)
            .collect();

        self.resolve_users(ids).await
    }
}
