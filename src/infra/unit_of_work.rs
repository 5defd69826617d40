//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-step use cases inside a
//! single database transaction: commit when the closure succeeds, rollback
//! when it fails.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseConnection, IsolationLevel, TransactionTrait};

use super::repositories::{
    CredentialRepository, CredentialStore, FollowRepository, FollowStore, PostRepository,
    PostStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method. Tests
/// implement it over mocked or in-memory repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync + 'static {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn credentials(&self) -> Arc<dyn CredentialRepository>;

    fn posts(&self) -> Arc<dyn PostRepository>;

    fn follows(&self) -> Arc<dyn FollowRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Repositories obtained from the [`TransactionContext`] all share the
    /// transaction. Committed on `Ok`, rolled back on `Err`.
    async fn transaction<F, Fut, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(TransactionContext) -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
        T: Send;
}

/// Repository access scoped to one transaction.
#[derive(Clone)]
pub struct TransactionContext {
    users: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialRepository>,
    posts: Arc<dyn PostRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl TransactionContext {
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialRepository>,
        posts: Arc<dyn PostRepository>,
        follows: Arc<dyn FollowRepository>,
    ) -> Self {
        Self {
            users,
            credentials,
            posts,
            follows,
        }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.credentials.clone()
    }

    pub fn posts(&self) -> Arc<dyn PostRepository> {
        self.posts.clone()
    }

    pub fn follows(&self) -> Arc<dyn FollowRepository> {
        self.follows.clone()
    }
}

/// SeaORM-backed UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    credential_repo: Arc<CredentialStore>,
    post_repo: Arc<PostStore>,
    follow_repo: Arc<FollowStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let shared = Arc::new(db.clone());
        Self {
            db,
            user_repo: Arc::new(UserStore::new(shared.clone())),
            credential_repo: Arc::new(CredentialStore::new(shared.clone())),
            post_repo: Arc::new(PostStore::new(shared.clone())),
            follow_repo: Arc::new(FollowStore::new(shared)),
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.credential_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }

    fn follows(&self) -> Arc<dyn FollowRepository> {
        self.follow_repo.clone()
    }

    async fn transaction<F, Fut, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(TransactionContext) -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
        T: Send,
    {
        let txn = Arc::new(
            self.db
                .begin_with_config(
                    Some(IsolationLevel::ReadCommitted),
                    Some(AccessMode::ReadWrite),
                )
                .await?,
        );

        let ctx = TransactionContext::new(
            Arc::new(UserStore::new(txn.clone())),
            Arc::new(CredentialStore::new(txn.clone())),
            Arc::new(PostStore::new(txn.clone())),
            Arc::new(FollowStore::new(txn.clone())),
        );

        let result = f(ctx).await;

        // Every store handed to the closure has been dropped with it by now.
        // A leaked clone leaves the transaction to roll back on drop.
        let txn = Arc::try_unwrap(txn)
            .map_err(|_| AppError::internal("Transaction still referenced after completion"))?;

        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
