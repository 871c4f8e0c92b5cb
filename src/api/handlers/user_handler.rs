//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{Created, NoContent};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(
        required(message = "Name is required"),
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    #[schema(example = "John Doe", max_length = 100)]
    pub name: Option<String>,
    /// User email address
    #[validate(
        required(message = "Email is required"),
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Email format is invalid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "user@example.com", max_length = 255)]
    pub email: Option<String>,
    /// User password (8 to 255 characters)
    #[validate(
        required(message = "Password is required"),
        custom(function = "not_blank", message = "Password is required"),
        length(min = 8, max = 255, message = "Password must be between 8 and 255 characters")
    )]
    #[schema(example = "SecurePass123!", min_length = 8, max_length = 255)]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        }
    }
}

/// User update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[schema(example = "Jane Doe", max_length = 100)]
    pub name: Option<String>,
    /// New email address
    #[validate(
        email(message = "Email format is invalid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "jane@example.com", max_length = 255)]
    pub email: Option<String>,
    /// New password (8 to 255 characters)
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must be between 8 and 255 characters"
    ))]
    #[schema(example = "NewSecurePass456!", min_length = 8, max_length = 255)]
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or invalid value", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok(Created(user))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error or invalid value", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_fields() {
        let req: CreateUserRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_create_request_blank_name() {
        let req = CreateUserRequest {
            name: Some("   ".into()),
            email: Some("user@example.com".into()),
            password: Some("password123".into()),
        };
        let errors = req.validate().unwrap_err();

        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_request_valid() {
        let req = CreateUserRequest {
            name: Some("John Doe".into()),
            email: Some("john@example.com".into()),
            password: Some("password123".into()),
        };
        assert!(req.validate().is_ok());

        let input = CreateUser::from(req);
        assert_eq!(input.name, "John Doe");
    }

    #[test]
    fn test_update_request_all_optional() {
        let req: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());

        let req = UpdateUserRequest {
            name: None,
            email: Some("bad".into()),
            password: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_password_bounds() {
        for password in ["", "short"] {
            let req = UpdateUserRequest {
                name: None,
                email: None,
                password: Some(password.into()),
            };
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("password"));
        }
    }
}
