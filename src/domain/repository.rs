//! User persistence contract.
//!
//! Defined by the domain, implemented by the infrastructure layer
//! (`infra::repositories` for PostgreSQL, `infra::memory` for tests).

use async_trait::async_trait;

use super::email::Email;
use super::user::User;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning identity and timestamps.
    ///
    /// Returns the stored snapshot. Fails with a persistence error if
    /// nothing was written.
    async fn save(&self, user: &User) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// List all users in insertion (ID) order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Persist changes to an existing user.
    ///
    /// Fails with `NotFound` if no row has the user's ID.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Permanently delete a user.
    ///
    /// Fails with `NotFound` if no row has the given ID.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Check whether any user owns the email address
    async fn exists_by_email(&self, email: &Email) -> AppResult<bool>;
}
