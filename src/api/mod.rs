//! API layer - HTTP handlers and extractors
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers and request DTOs
//! - Custom extractors
//! - Route definitions and OpenAPI document

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
