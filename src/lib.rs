//! User API - CRUD user management over HTTP
//!
//! Create, read, update, delete and list users, each with a name, an email
//! address and an Argon2-hashed password.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, value objects, repository contract, domain service
//! - **services**: Application use cases
//! - **infra**: Database, in-memory storage, password hashing, Unit of Work
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response helpers and serde adapters
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start without a database
//! cargo run -- serve --in-memory
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
pub use domain::{Email, HashedPassword, User, UserResponse};
pub use errors::{AppError, AppResult};
