//! Application route configuration.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, user_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::USERS_API_PATH;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(USERS_API_PATH, user_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
