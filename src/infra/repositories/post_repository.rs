//! Post repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use super::entities::user::{self as user_entity, Entity as UserEntity};
use crate::domain::{NewPost, Post, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
///
/// List queries return newest posts first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Post>>;

    /// Every post joined with its author; the author is `None` when the
    /// referenced user no longer resolves.
    async fn find_all_with_author(&self) -> AppResult<Vec<(Post, Option<User>)>>;

    /// Posts written by any of `user_ids`, joined with their author.
    async fn find_by_user_ids_with_author(
        &self,
        user_ids: &[Uuid],
    ) -> AppResult<Vec<(Post, Option<User>)>>;

    async fn create(&self, post: NewPost) -> AppResult<Post>;

    /// Persist content and `updated_at` of `post`
    async fn update(&self, post: &Post) -> AppResult<Post>;

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of PostRepository
pub struct PostStore<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> PostStore<C> {
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

fn joined(rows: Vec<(post::Model, Option<user_entity::Model>)>) -> Vec<(Post, Option<User>)> {
    rows.into_iter()
        .map(|(post, author)| (Post::from(post), author.map(User::from)))
        .collect()
}

#[async_trait]
impl<C> PostRepository for PostStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(result.map(Post::from))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Post::from).collect())
    }

    async fn find_all_with_author(&self) -> AppResult<Vec<(Post, Option<User>)>> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(joined(rows))
    }

    async fn find_by_user_ids_with_author(
        &self,
        user_ids: &[Uuid],
    ) -> AppResult<Vec<(Post, Option<User>)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = PostEntity::find()
            .filter(post::Column::UserId.is_in(user_ids.iter().copied()))
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(joined(rows))
    }

    async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new_post.author_id),
            content: Set(new_post.content.into_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(Post::from(model))
    }

    async fn update(&self, post: &Post) -> AppResult<Post> {
        let active_model = ActiveModel {
            id: Unchanged(post.id),
            user_id: Unchanged(post.author_id),
            content: Set(post.content.as_str().to_string()),
            created_at: Unchanged(post.created_at),
            updated_at: Set(post.updated_at),
        };

        let model = active_model
            .update(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::not_found("Post"),
                other => AppError::from(other),
            })?;

        Ok(Post::from(model))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let result = PostEntity::delete_by_id(id).exec(self.db.as_ref()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Post"));
        }

        Ok(())
    }
}
