//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::email::Email;
use super::error::{DomainError, DomainResult};
use super::password::HashedPassword;
use crate::config::MAX_NAME_LENGTH;

/// User aggregate root.
///
/// Immutable snapshot: every `update_*` call returns a new `User` that keeps
/// the identity and creation time and refreshes `updated_at`.
#[derive(Debug, Clone)]
pub struct User {
    id: Option<i64>,
    name: String,
    email: Email,
    password: HashedPassword,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, not yet persisted user.
    ///
    /// Identity and timestamps are assigned by the repository on save.
    pub fn new(name: impl Into<String>, email: Email, password: HashedPassword) -> DomainResult<Self> {
        Self::reconstitute(None, name, email, password, None, None)
    }

    /// Rebuild a user from stored state.
    pub fn reconstitute(
        id: Option<i64>,
        name: impl Into<String>,
        email: Email,
        password: HashedPassword,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            id,
            name,
            email,
            password,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &HashedPassword {
        &self.password
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Return a copy with a new name.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the name is blank or longer than 100 characters.
    pub fn update_name(&self, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            updated_at: Some(Utc::now()),
            ..self.clone()
        })
    }

    /// Return a copy with a new email address.
    pub fn update_email(&self, email: Email) -> Self {
        Self {
            email,
            updated_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// Return a copy with a new password hash.
    pub fn update_password(&self, password: HashedPassword) -> Self {
        Self {
            password,
            updated_at: Some(Utc::now()),
            ..self.clone()
        }
    }
}

/// Users are the same entity when they share an identity.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_value("Name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::invalid_value(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// User creation input (already shape-checked at the boundary)
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Plaintext password, hashed before it reaches the entity
    pub password: String,
}

/// Partial user update input; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User projection (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    #[serde(with = "crate::types::timestamp")]
    #[schema(value_type = String, example = "2024-01-01 09:30:00")]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    #[serde(with = "crate::types::timestamp")]
    #[schema(value_type = String, example = "2024-01-02 18:00:00")]
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&User> for UserResponse {
    type Error = DomainError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        match (user.id, user.created_at, user.updated_at) {
            (Some(id), Some(created_at), Some(updated_at)) => Ok(Self {
                id,
                name: user.name.clone(),
                email: user.email.value().to_string(),
                created_at,
                updated_at,
            }),
            _ => Err(DomainError::internal("user has not been persisted")),
        }
    }
}

impl TryFrom<User> for UserResponse {
    type Error = DomainError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        UserResponse::try_from(&user)
    }
}
