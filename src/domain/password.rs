//! Hashed password value object and the hashing capability contract.
//!
//! The domain only ever holds password hashes. Producing and checking them is
//! delegated to a [`PasswordEncoder`] supplied by the infrastructure layer.

use super::error::{DomainError, DomainResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Opaque password hash.
///
/// Value object - immutable, compared by value. Never holds plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedPassword([PROTECTED])")
    }
}

impl std::fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[PROTECTED]")
    }
}

impl HashedPassword {
    /// Wrap an existing hash (from the encoder or from storage).
    ///
    /// # Errors
    /// Returns `InvalidValue` if the hash is blank.
    pub fn new(hash: impl Into<String>) -> DomainResult<Self> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(DomainError::invalid_value("Password is required"));
        }
        Ok(Self { hash })
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }
}

/// One-way password hashing capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hash a plaintext password.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the plaintext is blank, shorter than 8 or
    /// longer than 255 characters.
    fn encode(&self, raw_password: &str) -> DomainResult<HashedPassword>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `false` on mismatch and on unreadable hashes.
    fn matches(&self, raw_password: &str, hashed: &HashedPassword) -> bool;
}
