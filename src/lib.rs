//! social-board - a short-post timeline with follows, profiles and search
//!
//! Users sign up and sign in with a username and password, post short
//! messages to a shared timeline, edit or delete their own posts, follow
//! each other and search by display name.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and value objects
//! - **services**: Application use cases
//! - **infra**: Database, migrations, repositories and the Unit of Work
//! - **api**: HTTP handlers, middleware, view models and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Follow, Password, Post, User};
pub use errors::{AppError, AppResult};
