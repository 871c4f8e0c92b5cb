//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::UserResponse;
use crate::errors::{ErrorResponse, FieldError};

/// OpenAPI documentation for the user management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        version = "0.1.0",
        description = "CRUD user management API with Axum, SeaORM, and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        health_handler::health,
    ),
    components(
        schemas(
            UserResponse,
            ErrorResponse,
            FieldError,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            health_handler::HealthResponse,
            health_handler::StorageStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
