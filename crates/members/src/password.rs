//! Stored credential (argon2, PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be at least 8 characters")]
    TooShort,

    #[error("failed to hash password")]
    Hash,
}

/// A hashed password. The plaintext never leaves the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a fresh salt.
    ///
    /// Argon2 is deliberately slow; callers on an async path should run this
    /// on the blocking pool.
    pub fn from_plain(password: &str) -> Result<Self, PasswordError> {
        if password.len() < 8 {
            return Err(PasswordError::TooShort);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| PasswordError::Hash)?;

        Ok(Self(hash.to_string()))
    }

    /// Wrap an already-hashed PHC string (e.g. loaded from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Constant-shape verification; malformed stored hashes read as a
    /// mismatch rather than an error channel.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = argon2::PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
