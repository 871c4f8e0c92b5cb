//! SeaORM user repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity, Model};
use crate::domain::{Email, User, UserRepository};
use crate::errors::{AppError, AppResult};

/// Concrete implementation of UserRepository.
///
/// Borrows any SeaORM connection, so the same code runs against a pooled
/// connection or an open transaction.
pub struct UserStore<'c, C: ConnectionTrait> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> UserStore<'c, C> {
    /// Create new repository instance
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

fn to_domain(model: Model) -> AppResult<User> {
    User::try_from(model).map_err(AppError::from)
}

fn is_unique_violation(err: Option<SqlErr>) -> bool {
    matches!(err, Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map write failures, turning unique index violations into duplicate email errors
fn map_write_err(err: DbErr, email: &Email) -> AppError {
    if is_unique_violation(err.sql_err()) {
        return AppError::DuplicateEmail(format!("Email is already registered: {}", email));
    }
    AppError::from(err)
}

#[async_trait]
impl<'c, C: ConnectionTrait> UserRepository for UserStore<'c, C> {
    async fn save(&self, user: &User) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name().to_string()),
            email: Set(user.email().value().to_string()),
            password: Set(user.password().as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.conn).await.map_err(|e| match e {
            DbErr::RecordNotInserted => AppError::persistence("Failed to save user"),
            other => map_write_err(other, user.email()),
        })?;

        tracing::debug!(user_id = model.id, "User inserted");
        to_domain(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email.value()))
            .one(self.conn)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let id = user
            .id()
            .ok_or_else(|| AppError::InvalidArgument("Cannot update a user without an ID".into()))?;

        let active_model = ActiveModel {
            id: Set(id),
            name: Set(user.name().to_string()),
            email: Set(user.email().value().to_string()),
            password: Set(user.password().as_str().to_string()),
            created_at: NotSet,
            updated_at: Set(user.updated_at().unwrap_or_else(Utc::now)),
        };

        let model = active_model.update(self.conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::not_found(format!("User not found: ID={}", id)),
            other => map_write_err(other, user.email()),
        })?;

        to_domain(model)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(self.conn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("User not found: ID={}", id)));
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email.value()))
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }
}
