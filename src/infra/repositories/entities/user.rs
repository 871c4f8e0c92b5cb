//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{DomainError, Email, HashedPassword, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database row to domain entity.
///
/// Stored values pass through the same checks as new ones; a row that
/// fails them is reported as corrupt state.
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let email = Email::new(model.email)
            .map_err(|e| DomainError::internal(format!("Stored user {} has bad email: {}", model.id, e)))?;
        let password = HashedPassword::new(model.password)
            .map_err(|e| DomainError::internal(format!("Stored user {} has bad password: {}", model.id, e)))?;

        User::reconstitute(
            Some(model.id),
            model.name,
            email,
            password,
            Some(model.created_at),
            Some(model.updated_at),
        )
    }
}
