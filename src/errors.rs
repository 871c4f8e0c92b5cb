//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. This is the only place where
//! failures are classified into HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body failed boundary validation
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: Vec<FieldError>,
    },

    /// A value object or entity rejected its input
    #[error("{0}")]
    InvalidArgument(String),

    /// Name and email violate the corporate naming rule
    #[error("{0}")]
    InvalidNameFormat(String),

    #[error("{0}")]
    DuplicateEmail(String),

    #[error("{0}")]
    NotFound(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A write did not take effect
    #[error("Persistence failure: {0}")]
    Persistence(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    /// Offending value, or `"null"` when the field was missing
    #[schema(example = "not-an-email")]
    pub rejected_value: String,
    #[schema(example = "Email format is invalid")]
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "User Not Found")]
    pub error: String,
    #[schema(example = "User not found: ID=42")]
    pub message: String,
    pub field_errors: Vec<FieldError>,
    #[serde(with = "crate::types::timestamp")]
    #[schema(value_type = String, example = "2024-01-01 09:30:00")]
    pub timestamp: DateTime<Utc>,
}

impl AppError {
    /// Short error title for client
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Validation Error",
            AppError::InvalidArgument(_) => "Invalid Argument",
            AppError::InvalidNameFormat(_) => "Invalid Name Format",
            AppError::DuplicateEmail(_) => "Duplicate Email",
            AppError::NotFound(_) => "User Not Found",
            AppError::Database(_) | AppError::Persistence(_) | AppError::Internal(_) => {
                "Internal Server Error"
            }
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::InvalidArgument(_)
            | AppError::InvalidNameFormat(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Persistence(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An unexpected error occurred".to_string()
            }
            AppError::Persistence(msg) => {
                tracing::error!("Persistence failure: {}", msg);
                "An unexpected error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Build the response body for this error
    pub fn to_body(&self) -> ErrorResponse {
        let field_errors = match self {
            AppError::Validation { field_errors, .. } => field_errors.clone(),
            _ => Vec::new(),
        };

        ErrorResponse {
            status: self.status().as_u16(),
            error: self.title().to_string(),
            message: self.user_message(),
            field_errors,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue(msg) => AppError::InvalidArgument(msg),
            DomainError::DuplicateEmail(msg) => AppError::DuplicateEmail(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        AppError::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::Persistence(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
