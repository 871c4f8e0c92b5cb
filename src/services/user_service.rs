//! User service - Handles user-related use cases.
//!
//! Each operation runs inside exactly one Unit of Work transaction and
//! returns projections, never entities.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::CORPORATE_EMAIL_DOMAIN;
use crate::domain::{
    CreateUser, Email, PasswordEncoder, UpdateUser, User, UserDomainService, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user
    async fn create_user(&self, input: CreateUser) -> AppResult<UserResponse>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<UserResponse>;

    /// List all users in ID order
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Apply a partial update; absent fields are left untouched
    async fn update_user(&self, id: i64, input: UpdateUser) -> AppResult<UserResponse>;

    /// Permanently delete a user
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { uow, encoder }
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found(format!("User not found: ID={}", id))
}

/// Corporate accounts may not use digits in their name.
///
/// Only applies when both values are known.
fn validate_name_and_email(name: Option<&str>, email: Option<&str>) -> AppResult<()> {
    if let (Some(name), Some(email)) = (name, email) {
        if email.ends_with(CORPORATE_EMAIL_DOMAIN) && name.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidNameFormat(
                "Name must not contain digits for corporate email addresses".to_string(),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, input: CreateUser) -> AppResult<UserResponse> {
        validate_name_and_email(Some(input.name.as_str()), Some(input.email.as_str()))?;

        let email = Email::new(input.email)?;
        let password = self.encoder.encode(&input.password)?;
        let name = input.name;

        let saved = with_transaction!(self.uow, |ctx| {
            UserDomainService::new(ctx.users())
                .check_email_duplication(&email)
                .await?;

            let user = User::new(name, email, password)?;
            ctx.users().save(&user).await
        })?;

        tracing::info!(user_id = ?saved.id(), "User created");
        Ok(UserResponse::try_from(saved)?)
    }

    async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        let user = with_transaction!(read_only self.uow, |ctx| {
            ctx.users().find_by_id(id).await?.ok_or_else(|| user_not_found(id))
        })?;

        Ok(UserResponse::try_from(user)?)
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = with_transaction!(read_only self.uow, |ctx| ctx.users().find_all().await)?;

        users
            .iter()
            .map(|user| UserResponse::try_from(user).map_err(AppError::from))
            .collect()
    }

    async fn update_user(&self, id: i64, input: UpdateUser) -> AppResult<UserResponse> {
        let encoder = Arc::clone(&self.encoder);

        let updated = with_transaction!(self.uow, |ctx| {
            let mut user = ctx
                .users()
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id))?;

            validate_name_and_email(input.name.as_deref(), input.email.as_deref())?;

            if let Some(name) = input.name.filter(|n| n != user.name()) {
                user = user.update_name(name)?;
            }

            if let Some(raw) = input.email.filter(|e| e != user.email().value()) {
                let email = Email::new(raw)?;
                if let Some(owner) = ctx.users().find_by_email(&email).await? {
                    if owner.id() != Some(id) {
                        return Err(AppError::DuplicateEmail(format!(
                            "Email is already registered: {}",
                            email
                        )));
                    }
                }
                user = user.update_email(email);
            }

            if let Some(raw) = input.password.filter(|p| !p.trim().is_empty()) {
                let hashed = encoder.encode(&raw)?;
                user = user.update_password(hashed);
            }

            ctx.users().update(&user).await
        })?;

        tracing::info!(user_id = id, "User updated");
        Ok(UserResponse::try_from(updated)?)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            if ctx.users().find_by_id(id).await?.is_none() {
                return Err(user_not_found(id));
            }
            ctx.users().delete_by_id(id).await
        })?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
