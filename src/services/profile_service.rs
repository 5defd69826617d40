//! Profile service - viewing, editing and searching user profiles.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{DisplayName, Post, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_user_profile(&self, id: Uuid) -> AppResult<User>;

    async fn get_user_profile_by_username(&self, username: &str) -> AppResult<User>;

    /// Posts written by `id`, newest first
    async fn get_user_posts(&self, id: Uuid) -> AppResult<Vec<Post>>;

    async fn get_following_count(&self, id: Uuid) -> AppResult<u64>;

    async fn get_follower_count(&self, id: Uuid) -> AppResult<u64>;

    /// Rewrite display name and bio. The avatar is preserved.
    async fn update_profile(
        &self,
        id: Uuid,
        display_name: Option<String>,
        bio: Option<String>,
    ) -> AppResult<User>;

    /// All users for a blank keyword, otherwise display-name matches
    async fn search_users(&self, keyword: Option<&str>) -> AppResult<Vec<User>>;
}

pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn get_user_profile(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn get_user_profile_by_username(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_not_found("User")
    }

    async fn get_user_posts(&self, id: Uuid) -> AppResult<Vec<Post>> {
        self.uow.posts().find_by_user_id(id).await
    }

    async fn get_following_count(&self, id: Uuid) -> AppResult<u64> {
        self.uow.follows().count_by_follower_id(id).await
    }

    async fn get_follower_count(&self, id: Uuid) -> AppResult<u64> {
        self.uow.follows().count_by_following_id(id).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        display_name: Option<String>,
        bio: Option<String>,
    ) -> AppResult<User> {
        let user = self
            .uow
            .transaction(move |ctx| async move {
                let mut user = ctx.users().find_by_id(id).await?.ok_or_not_found("User")?;
                user.update_profile(DisplayName::new(display_name), bio);
                ctx.users().update(&user).await
            })
            .await?;

        tracing::info!(user = %user.username, "profile updated");
        Ok(user)
    }

    async fn search_users(&self, keyword: Option<&str>) -> AppResult<Vec<User>> {
        match keyword.map(str::trim).filter(|k| !k.is_empty()) {
            Some(keyword) => self.uow.users().search_by_display_name(keyword).await,
            None => self.uow.users().find_all().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Email;
    use crate::errors::AppError;
    use crate::infra::unit_of_work::testing::MockRepositories;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn user(id: Uuid) -> User {
        let now = Utc::now();
        User {
            id,
            username: "alice".to_string(),
            email: Email::from_stored("alice@example.com".to_string()),
            display_name: DisplayName::new(Some("Alice".to_string())),
            bio: None,
            avatar_url: Some("/avatars/alice.png".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let mut repos = MockRepositories::default();
        repos.users.expect_find_by_id().returning(|_| Ok(None));

        let service = ProfileManager::new(repos.into_uow());
        let err = service.get_user_profile(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_profile_preserves_avatar() {
        let id = Uuid::new_v4();
        let mut repos = MockRepositories::default();
        repos
            .users
            .expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(user(id))));
        repos
            .users
            .expect_update()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = ProfileManager::new(repos.into_uow());
        let updated = service
            .update_profile(id, Some("Alice L.".into()), Some("Hello".into()))
            .await
            .unwrap();

        assert_eq!(updated.display_name.as_str(), "Alice L.");
        assert_eq!(updated.bio.as_deref(), Some("Hello"));
        assert_eq!(updated.avatar_url.as_deref(), Some("/avatars/alice.png"));
    }

    #[tokio::test]
    async fn blank_keyword_lists_everyone() {
        let mut repos = MockRepositories::default();
        repos
            .users
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![user(Uuid::new_v4())]));
        repos.users.expect_search_by_display_name().never();

        let service = ProfileManager::new(repos.into_uow());
        assert_eq!(service.search_users(Some("   ")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn keyword_searches_display_names() {
        let mut repos = MockRepositories::default();
        repos
            .users
            .expect_search_by_display_name()
            .with(eq("Ali"))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProfileManager::new(repos.into_uow());
        assert!(service.search_users(Some(" Ali ")).await.unwrap().is_empty());
    }
}
