//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::HealthCheck;
use crate::services::{ServiceContainer, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User use cases
    pub user_service: Arc<dyn UserService>,
    /// Storage liveness probe
    pub storage: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, storage: Arc<dyn HealthCheck>) -> Self {
        Self {
            user_service,
            storage,
        }
    }

    /// Create application state from a service container.
    pub fn from_services(services: &dyn ServiceContainer) -> Self {
        Self::new(services.users(), services.storage())
    }
}
