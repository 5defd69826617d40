//! Follow relation repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::follow::{self, ActiveModel, Entity as FollowEntity};
use crate::domain::{Follow, NewFollow, ALREADY_FOLLOWING_MESSAGE};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find_by_pair(&self, follower_id: Uuid, following_id: Uuid)
        -> AppResult<Option<Follow>>;

    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool>;

    /// Relations where `follower_id` is the follower, oldest first
    async fn find_by_follower_id(&self, follower_id: Uuid) -> AppResult<Vec<Follow>>;

    /// Relations where `following_id` is followed, oldest first
    async fn find_by_following_id(&self, following_id: Uuid) -> AppResult<Vec<Follow>>;

    async fn count_by_follower_id(&self, follower_id: Uuid) -> AppResult<u64>;

    async fn count_by_following_id(&self, following_id: Uuid) -> AppResult<u64>;

    /// Insert a relation. A duplicate pair is a validation error.
    async fn create(&self, follow: NewFollow) -> AppResult<Follow>;

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of FollowRepository
pub struct FollowStore<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> FollowStore<C> {
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> FollowRepository for FollowStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_pair(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> AppResult<Option<Follow>> {
        let result = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowingId.eq(following_id))
            .one(self.db.as_ref())
            .await?;

        Ok(result.map(Follow::from))
    }

    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let count = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowingId.eq(following_id))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn find_by_follower_id(&self, follower_id: Uuid) -> AppResult<Vec<Follow>> {
        let models = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .order_by_asc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Follow::from).collect())
    }

    async fn find_by_following_id(&self, following_id: Uuid) -> AppResult<Vec<Follow>> {
        let models = FollowEntity::find()
            .filter(follow::Column::FollowingId.eq(following_id))
            .order_by_asc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Follow::from).collect())
    }

    async fn count_by_follower_id(&self, follower_id: Uuid) -> AppResult<u64> {
        let count = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_by_following_id(&self, following_id: Uuid) -> AppResult<u64> {
        let count = FollowEntity::find()
            .filter(follow::Column::FollowingId.eq(following_id))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn create(&self, new_follow: NewFollow) -> AppResult<Follow> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            follower_id: Set(new_follow.follower_id),
            following_id: Set(new_follow.following_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::on_unique_violation(e, ALREADY_FOLLOWING_MESSAGE))?;

        Ok(Follow::from(model))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        FollowEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(())
    }
}
