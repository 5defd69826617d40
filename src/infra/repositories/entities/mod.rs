//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod credential;
pub mod follow;
pub mod post;
pub mod user;
