//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the Unit of Work.

mod auth_service;
pub mod container;
mod follow_service;
mod post_service;
mod profile_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, SessionClaims, SessionToken, SignedIn, SignupRequest,
    PASSWORD_MISMATCH_MESSAGE,
};
pub use follow_service::{FollowManager, FollowService};
pub use post_service::{
    PostManager, PostService, TimelineScope, NOT_POST_OWNER_DELETE_MESSAGE,
    NOT_POST_OWNER_EDIT_MESSAGE,
};
pub use profile_service::{ProfileManager, ProfileService};
