//! User profile repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::LikeExpr, ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, USERNAME_TAKEN_MESSAGE};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users, ordered by username
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Users whose display name contains `keyword` literally
    async fn search_by_display_name(&self, keyword: &str) -> AppResult<Vec<User>>;

    /// Insert a profile. A duplicate username is a validation error.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Persist the mutable profile fields of `user`
    async fn update(&self, user: &User) -> AppResult<User>;
}

/// LIKE pattern matching `keyword` anywhere, with its wildcards escaped
fn contains_pattern(keyword: &str) -> LikeExpr {
    LikeExpr::new(escaped_substring(keyword)).escape('\\')
}

fn escaped_substring(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// SeaORM implementation of UserRepository.
///
/// Generic over the connection so the same store serves both the pool and
/// an open transaction.
pub struct UserStore<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> UserStore<C> {
    /// Create new repository instance
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> UserRepository for UserStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Username)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn search_by_display_name(&self, keyword: &str) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::DisplayName.like(contains_pattern(keyword)))
            .order_by_asc(user::Column::Username)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email.as_str().to_string()),
            display_name: Set(new_user.display_name.into_raw()),
            bio: Set(new_user.bio),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::on_unique_violation(e, USERNAME_TAKEN_MESSAGE))?;

        Ok(User::from(model))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Unchanged(user.id),
            username: Unchanged(user.username.clone()),
            email: Set(user.email.as_str().to_string()),
            display_name: Set(user.display_name.raw().map(str::to_string)),
            bio: Set(user.bio.clone()),
            avatar_url: Set(user.avatar_url.clone()),
            created_at: Unchanged(user.created_at),
            updated_at: Set(user.updated_at),
        };

        let model = active_model
            .update(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::not_found("User"),
                other => AppError::from(other),
            })?;

        Ok(User::from(model))
    }
}
