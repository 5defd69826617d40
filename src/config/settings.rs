//! Application settings loaded from environment variables.

use std::env;

use chrono::Duration;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_HOURS,
    MAX_SESSION_TTL_HOURS, MIN_SESSION_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    session_secret: String,
    pub session_ttl_hours: i64,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub session_cookie_secure: bool,
    pub server_host: String,
    pub server_port: u16,
    /// Restrict the timeline to followed users plus self
    pub timeline_following_only: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("timeline_following_only", &self.timeline_following_only)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SESSION_SECRET is not set in a release build or is too short,
    /// or if SESSION_TTL_HOURS is outside `1..=MAX_SESSION_TTL_HOURS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                "dev-session-secret-minimum-32-chars!".to_string()
            } else {
                panic!("SESSION_SECRET environment variable must be set in production");
            }
        });

        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            panic!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            );
        }

        let session_ttl_hours =
            parse_var("SESSION_TTL_HOURS").unwrap_or(DEFAULT_SESSION_TTL_HOURS);
        if let Err(message) = check_session_ttl_hours(session_ttl_hours) {
            panic!("{}", message);
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            session_secret,
            session_ttl_hours,
            session_cookie_secure: parse_var("SESSION_COOKIE_SECURE").unwrap_or(false),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            timeline_following_only: parse_var("TIMELINE_FOLLOWING_ONLY").unwrap_or(false),
        }
    }

    /// Build a configuration with defaults around an explicit secret.
    ///
    /// Used by tests and embedders that do not read the process environment.
    pub fn with_session_secret(session_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            session_secret: session_secret.into(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            session_cookie_secure: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            timeline_following_only: false,
        }
    }

    /// Get secret bytes for session token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Session lifetime, or `None` when `session_ttl_hours` is out of range.
    pub fn session_ttl(&self) -> Option<Duration> {
        check_session_ttl_hours(self.session_ttl_hours).ok()?;
        Duration::try_hours(self.session_ttl_hours)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn check_session_ttl_hours(hours: i64) -> Result<i64, String> {
    if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(format!(
            "SESSION_TTL_HOURS must be between 1 and {}, got {}",
            MAX_SESSION_TTL_HOURS, hours
        ))
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
