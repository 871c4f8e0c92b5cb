//! Argon2 password encoder.
//!
//! Centralized Argon2 configuration behind the domain's `PasswordEncoder`
//! contract. Hashes are PHC strings with a per-password random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::{DomainError, DomainResult, HashedPassword, PasswordEncoder};

/// Argon2id implementation of [`PasswordEncoder`].
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordEncoder;

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Get Argon2 instance with default config.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }

    fn validate_plaintext(raw_password: &str) -> DomainResult<()> {
        if raw_password.trim().is_empty() {
            return Err(DomainError::invalid_value("Password is required"));
        }

        let length = raw_password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(DomainError::invalid_value(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(DomainError::invalid_value(format!(
                "Password must be at most {} characters",
                MAX_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> DomainResult<HashedPassword> {
        Self::validate_plaintext(raw_password)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;

        HashedPassword::new(hash.to_string())
    }

    fn matches(&self, raw_password: &str, hashed: &HashedPassword) -> bool {
        match PasswordHash::new(hashed.as_str()) {
            Ok(parsed) => Self::argon2()
                .verify_password(raw_password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::debug!("Unreadable password hash: {}", e);
                false
            }
        }
    }
}
