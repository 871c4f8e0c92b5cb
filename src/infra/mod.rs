//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and repositories
//! - In-memory storage for tests and local runs
//! - Password hashing
//! - Unit of Work for transaction management

pub mod db;
pub mod memory;
pub mod repositories;
pub mod security;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use memory::MemoryPersistence;
pub use repositories::UserStore;
pub use security::Argon2PasswordEncoder;
pub use unit_of_work::{HealthCheck, Persistence, TransactionContext, TxFuture, UnitOfWork};
