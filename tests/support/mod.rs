//! In-memory repositories and Unit of Work shared by the integration tests.
//!
//! Enforces the same uniqueness rules as the database schema (username,
//! follow pair) so duplicate handling can be tested without PostgreSQL.

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use social_board::config::Config;
use social_board::domain::{
    Credential, Follow, NewFollow, NewPost, NewUser, Password, Post, User,
    ALREADY_FOLLOWING_MESSAGE, USERNAME_TAKEN_MESSAGE,
};
use social_board::errors::{AppError, AppResult};
use social_board::infra::{
    CredentialRepository, FollowRepository, PostRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use social_board::services::{AuthService, Services, SignupRequest};

pub const TEST_SECRET: &str = "integration-test-session-secret-32!!";

pub fn test_config() -> Config {
    Config::with_session_secret(TEST_SECRET)
}

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    credentials: Mutex<Vec<Credential>>,
    posts: Mutex<Vec<Post>>,
    follows: Mutex<Vec<Follow>>,
}

impl MemoryStore {
    /// Drop a user row without touching posts or follows
    pub fn forget_user(&self, id: Uuid) {
        self.users.lock().unwrap().retain(|user| user.id != id);
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.reverse();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn search_by_display_name(&self, keyword: &str) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.display_name.raw().is_some_and(|name| name.contains(keyword)))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::validation(USERNAME_TAKEN_MESSAGE));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            display_name: new_user.display_name,
            bio: new_user.bio,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User"))?;
        *stored = user.clone();
        Ok(user.clone())
    }
}

#[async_trait]
impl CredentialRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.username == username)
            .cloned())
    }

    async fn create(&self, username: String, password: Password) -> AppResult<Credential> {
        let credential = Credential {
            username,
            password,
            enabled: true,
            created_at: Utc::now(),
        };
        self.credentials.lock().unwrap().push(credential.clone());
        Ok(credential)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Post>> {
        let posts = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(posts))
    }

    async fn find_all_with_author(&self) -> AppResult<Vec<(Post, Option<User>)>> {
        let posts = newest_first(self.posts.lock().unwrap().clone());
        let users = self.users.lock().unwrap();
        Ok(posts
            .into_iter()
            .map(|post| {
                let author = users.iter().find(|u| u.id == post.author_id).cloned();
                (post, author)
            })
            .collect())
    }

    async fn find_by_user_ids_with_author(
        &self,
        user_ids: &[Uuid],
    ) -> AppResult<Vec<(Post, Option<User>)>> {
        Ok(self
            .find_all_with_author()
            .await?
            .into_iter()
            .filter(|(post, _)| user_ids.contains(&post.author_id))
            .collect())
    }

    async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id: new_post.author_id,
            content: new_post.content,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> AppResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::not_found("Post"))?;
        *stored = post.clone();
        Ok(post.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(AppError::not_found("Post"));
        }
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn find_by_pair(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> AppResult<Option<Follow>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
            .cloned())
    }

    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        Ok(self.find_by_pair(follower_id, following_id).await?.is_some())
    }

    async fn find_by_follower_id(&self, follower_id: Uuid) -> AppResult<Vec<Follow>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == follower_id)
            .cloned()
            .collect())
    }

    async fn find_by_following_id(&self, following_id: Uuid) -> AppResult<Vec<Follow>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.following_id == following_id)
            .cloned()
            .collect())
    }

    async fn count_by_follower_id(&self, follower_id: Uuid) -> AppResult<u64> {
        Ok(self.find_by_follower_id(follower_id).await?.len() as u64)
    }

    async fn count_by_following_id(&self, following_id: Uuid) -> AppResult<u64> {
        Ok(self.find_by_following_id(following_id).await?.len() as u64)
    }

    async fn create(&self, new_follow: NewFollow) -> AppResult<Follow> {
        let mut follows = self.follows.lock().unwrap();
        if follows.iter().any(|f| {
            f.follower_id == new_follow.follower_id && f.following_id == new_follow.following_id
        }) {
            return Err(AppError::validation(ALREADY_FOLLOWING_MESSAGE));
        }

        let follow = Follow {
            id: Uuid::new_v4(),
            follower_id: new_follow.follower_id,
            following_id: new_follow.following_id,
            created_at: Utc::now(),
        };
        follows.push(follow.clone());
        Ok(follow)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        self.follows.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}

/// Unit of Work over one [`MemoryStore`]. Transactions run the closure
/// directly; nothing is rolled back.
#[derive(Clone, Default)]
pub struct MemoryUnitOfWork {
    pub store: Arc<MemoryStore>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.store.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.store.clone()
    }

    fn follows(&self) -> Arc<dyn FollowRepository> {
        self.store.clone()
    }

    async fn transaction<F, Fut, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(TransactionContext) -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
        T: Send,
    {
        let ctx = TransactionContext::new(
            self.users(),
            self.credentials(),
            self.posts(),
            self.follows(),
        );
        f(ctx).await
    }
}

/// Services wired to a fresh in-memory store
pub fn services_with(config: Config) -> (Services, Arc<MemoryStore>) {
    let uow = Arc::new(MemoryUnitOfWork::default());
    let store = uow.store.clone();
    (Services::new(uow, config), store)
}

pub fn services() -> (Services, Arc<MemoryStore>) {
    services_with(test_config())
}

pub fn signup_request(username: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        password: "secret1".to_string(),
        password_confirm: "secret1".to_string(),
        email: format!("{}@example.com", username),
        display_name: Some(format!("{} display", username)),
        bio: None,
    }
}

/// Sign up `username` and return the created user
pub async fn sign_up(auth: &dyn AuthService, username: &str) -> User {
    auth.signup(signup_request(username))
        .await
        .expect("signup succeeds")
        .user
}
