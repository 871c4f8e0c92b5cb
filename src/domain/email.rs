//! Email value object.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{DomainError, DomainResult};
use crate::config::MAX_EMAIL_LENGTH;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Validated email address.
///
/// Compared by value. The stored string is exactly the one supplied; no case
/// folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    value: String,
}

impl Email {
    /// Validate and wrap a raw email address.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the address is blank, longer than 255
    /// characters, or not shaped like `local@domain.tld`.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let value = raw.into();

        if value.trim().is_empty() {
            return Err(DomainError::invalid_value("Email is required"));
        }
        if value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(DomainError::invalid_value(format!(
                "Email must be at most {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(DomainError::invalid_value("Email format is invalid"));
        }

        Ok(Self { value })
    }

    /// Get the address as a string slice.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume and return the address.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.value
    }
}
