//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, each with a SeaORM-backed store that works on
//! either the connection pool or an open transaction.

mod credential_repository;
pub(crate) mod entities;
mod follow_repository;
mod post_repository;
mod user_repository;

pub use credential_repository::{CredentialRepository, CredentialStore};
pub use follow_repository::{FollowRepository, FollowStore};
pub use post_repository::{PostRepository, PostStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use follow_repository::MockFollowRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
