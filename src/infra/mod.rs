//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories (SeaORM)
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CredentialRepository, CredentialStore, FollowRepository, FollowStore, PostRepository,
    PostStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
