//! User domain service - rules that span more than one aggregate.

use super::email::Email;
use super::error::DomainError;
use super::repository::UserRepository;
use crate::errors::AppResult;

/// Cross-user business rules.
///
/// Borrows the repository it checks against so the rule runs inside the
/// caller's transaction.
pub struct UserDomainService<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> UserDomainService<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// Fail with `DuplicateEmail` if any user already owns `email`.
    pub async fn check_email_duplication(&self, email: &Email) -> AppResult<()> {
        if self.users.exists_by_email(email).await? {
            return Err(DomainError::duplicate_email(format!(
                "Email is already registered: {}",
                email
            ))
            .into());
        }
        Ok(())
    }
}
