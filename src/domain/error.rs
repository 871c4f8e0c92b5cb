//! Domain-level errors.
//!
//! These errors represent business rule violations raised by value objects,
//! entities and domain services. They are independent of HTTP and storage.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value object or entity invariant was violated
    #[error("{0}")]
    InvalidValue(String),

    /// Email address is already registered to another user
    #[error("{0}")]
    DuplicateEmail(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an invalid value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        DomainError::InvalidValue(msg.into())
    }

    /// Create a duplicate email error
    pub fn duplicate_email(msg: impl Into<String>) -> Self {
        DomainError::DuplicateEmail(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
