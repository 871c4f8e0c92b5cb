//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: Entities, Value Objects, Domain Services and the repository
//! contract the infrastructure layer implements.

pub mod email;
pub mod error;
pub mod password;
pub mod repository;
pub mod service;
pub mod user;

pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use password::{HashedPassword, PasswordEncoder};
pub use repository::UserRepository;
pub use service::UserDomainService;
pub use user::{CreateUser, UpdateUser, User, UserResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordEncoder;
#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
