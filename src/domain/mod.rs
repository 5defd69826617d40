//! Domain layer - Core business entities and logic
//!
//! Entities (`User`, `Post`, `Follow`, `Credential`) and the value objects
//! that guard their invariants. No infrastructure dependencies.

pub mod credential;
pub mod follow;
pub mod password;
pub mod post;
pub mod user;
pub mod values;

pub use credential::Credential;
pub use follow::{
    Follow, NewFollow, ALREADY_FOLLOWING_MESSAGE, NOT_FOLLOWING_MESSAGE, SELF_FOLLOW_MESSAGE,
};
pub use password::Password;
pub use post::{NewPost, Post, PostResponse, PostWithAuthor, TimelineEntryResponse};
pub use user::{NewUser, User, UserResponse, USERNAME_TAKEN_MESSAGE};
pub use values::{Content, DisplayName, Email};
