//! Application state - Dependency injection container.
//!
//! Provides handlers with every application service and the database handle.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, FollowService, PostService, ProfileService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Signup, login and session verification
    pub auth_service: Arc<dyn AuthService>,
    /// Profiles, user search and profile counts
    pub profile_service: Arc<dyn ProfileService>,
    /// Timeline and posts
    pub post_service: Arc<dyn PostService>,
    /// Follow graph
    pub follow_service: Arc<dyn FollowService>,
    /// Database handle for health checks; absent when services are injected
    pub database: Option<Arc<Database>>,
    /// Whether session cookies are marked `Secure`
    pub session_cookie_secure: bool,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let session_cookie_secure = config.session_cookie_secure;
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            database: Some(database),
            ..Self::from_services(&container, session_cookie_secure)
        }
    }

    /// Create application state from any service container.
    ///
    /// Used by tests to run the router over in-memory repositories.
    pub fn from_services(container: &impl ServiceContainer, session_cookie_secure: bool) -> Self {
        Self {
            auth_service: container.auth(),
            profile_service: container.profiles(),
            post_service: container.posts(),
            follow_service: container.follows(),
            database: None,
            session_cookie_secure,
        }
    }
}
