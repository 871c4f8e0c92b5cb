//! Service Container - Centralized service access.
//!
//! Wires the storage backend, password encoder and use cases together and
//! hands out trait objects to the HTTP layer.

use std::sync::Arc;

use super::{UserManager, UserService};
use crate::domain::PasswordEncoder;
use crate::infra::{Argon2PasswordEncoder, Database, HealthCheck, MemoryPersistence, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get storage health probe
    fn storage(&self) -> Arc<dyn HealthCheck>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    storage: Arc<dyn HealthCheck>,
}

impl Services {
    /// Create a service container with manually injected services
    pub fn new(user_service: Arc<dyn UserService>, storage: Arc<dyn HealthCheck>) -> Self {
        Self {
            user_service,
            storage,
        }
    }

    /// Wire services over any storage backend
    pub fn with_persistence<U>(uow: Arc<U>, encoder: Arc<dyn PasswordEncoder>) -> Self
    where
        U: UnitOfWork + HealthCheck + 'static,
    {
        let user_service = Arc::new(UserManager::new(Arc::clone(&uow), encoder));
        Self::new(user_service, uow)
    }

    /// Create service container backed by PostgreSQL
    pub fn from_database(database: Database) -> Self {
        Self::with_persistence(
            Arc::new(Persistence::new(database)),
            Arc::new(Argon2PasswordEncoder::new()),
        )
    }

    /// Create service container backed by process memory
    pub fn in_memory() -> Self {
        Self::with_persistence(
            Arc::new(MemoryPersistence::new()),
            Arc::new(Argon2PasswordEncoder::new()),
        )
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn storage(&self) -> Arc<dyn HealthCheck> {
        self.storage.clone()
    }
}
