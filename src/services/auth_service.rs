//! Authentication service - signup, login and session tokens.
//!
//! Credentials (username + argon2 hash) and profiles are separate records,
//! created together in one transaction at signup. Sessions are HS256 tokens
//! carried in a cookie by the HTTP layer.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{DisplayName, Email, NewUser, Password, User, USERNAME_TAKEN_MESSAGE};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signed session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Everything a new account is created from
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// An authenticated user together with a fresh session
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub session: SessionToken,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create credential and profile, then open a session for the new user.
    ///
    /// Fails when the passwords differ or the username is taken.
    async fn signup(&self, request: SignupRequest) -> AppResult<SignedIn>;

    /// Check username and password and open a session.
    async fn login(&self, username: &str, password: &str) -> AppResult<SignedIn>;

    /// Decode and validate a session token
    fn verify_session(&self, token: &str) -> AppResult<SessionClaims>;
}

fn session_ttl(config: &Config) -> AppResult<Duration> {
    config.session_ttl().ok_or_else(|| {
        AppError::internal(format!(
            "invalid session lifetime: {} hours",
            config.session_ttl_hours
        ))
    })
}

fn issue_session(user: &User, config: &Config, ttl: Duration) -> AppResult<SessionToken> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::internal("session expiry out of range"))?;

    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret_bytes()),
    )?;

    Ok(SessionToken {
        token,
        expires_in: (expires_at - now).num_seconds(),
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, request: SignupRequest) -> AppResult<SignedIn> {
        if request.password != request.password_confirm {
            return Err(AppError::validation(PASSWORD_MISMATCH_MESSAGE));
        }

        // Checked up front so no account is committed without a session
        let ttl = session_ttl(&self.config)?;

        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }

        if self.uow.users().find_by_username(&username).await?.is_some() {
            tracing::warn!(user = %username, "signup rejected: username taken");
            return Err(AppError::validation(USERNAME_TAKEN_MESSAGE));
        }

        let email = Email::parse(&request.email)?;
        let password = Password::new(&request.password)?;
        let profile = NewUser::new(
            username.clone(),
            email,
            DisplayName::new(request.display_name),
            request.bio,
        );

        let user = self
            .uow
            .transaction(move |ctx| async move {
                ctx.credentials().create(username, password).await?;
                ctx.users().create(profile).await
            })
            .await?;

        tracing::info!(user = %user.username, user_id = %user.id, "account created");

        let session = issue_session(&user, &self.config, ttl)?;
        Ok(SignedIn { user, session })
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<SignedIn> {
        let ttl = session_ttl(&self.config)?;
        let credential = self.uow.credentials().find_by_username(username).await?;

        // Unknown usernames still pay for one hash verification
        let accepted = match &credential {
            Some(credential) => credential.accepts(password),
            None => Password::verify_against_dummy(password),
        };

        if !accepted {
            tracing::warn!(user = %username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        tracing::info!(user = %user.username, "login succeeded");

        let session = issue_session(&user, &self.config, ttl)?;
        Ok(SignedIn { user, session })
    }

    fn verify_session(&self, token: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
