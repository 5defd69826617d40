//! Credential repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set};

use super::entities::credential::{ActiveModel, Entity as CredentialEntity};
use crate::domain::{Credential, Password, USERNAME_TAKEN_MESSAGE};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>>;

    /// Store an enabled credential for `username`
    async fn create(&self, username: String, password: Password) -> AppResult<Credential>;
}

/// SeaORM implementation of CredentialRepository
pub struct CredentialStore<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> CredentialStore<C> {
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> CredentialRepository for CredentialStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let result = CredentialEntity::find_by_id(username.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(result.map(Credential::from))
    }

    async fn create(&self, username: String, password: Password) -> AppResult<Credential> {
        let active_model = ActiveModel {
            username: Set(username),
            password_hash: Set(password.into_string()),
            enabled: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::on_unique_violation(e, USERNAME_TAKEN_MESSAGE))?;

        Ok(Credential::from(model))
    }
}
