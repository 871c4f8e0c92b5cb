//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Storage backend status
    pub storage: StorageStatus,
}

/// Storage backend status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageStatus {
    #[schema(example = "postgres")]
    pub backend: String,
    #[schema(example = "healthy")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check with storage connectivity check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Storage unavailable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match state.storage.ping().await {
        Ok(()) => StorageStatus {
            backend: state.storage.backend().to_string(),
            status: "healthy".to_string(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            StorageStatus {
                backend: state.storage.backend().to_string(),
                status: "unhealthy".to_string(),
                error: Some("Storage is unreachable".to_string()),
            }
        }
    };

    let healthy = storage.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
