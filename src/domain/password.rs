//! Salted password hashing.
//!
//! Passwords are stored as argon2id PHC strings; the salt is generated per
//! hash and embedded in the string, so verification needs nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed password value object.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// `MIN_PASSWORD_LENGTH`.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// `new` on the blocking pool.
    pub async fn hash(plain_text: String) -> AppResult<Self> {
        tokio::task::spawn_blocking(move || Self::new(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("Password hash task failed: {}", e)))?
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }

    /// `verify` on the blocking pool.
    pub async fn matches(self, plain_text: String) -> bool {
        match tokio::task::spawn_blocking(move || self.verify(&plain_text)).await {
            Ok(verified) => verified,
            Err(e) => {
                tracing::error!("Password verify task failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = Password::new("SecurePassword123!").unwrap();

        assert!(password.verify("SecurePassword123!"));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = Password::new("SamePassword123").unwrap();
        let second = Password::new("SamePassword123").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(Password::from_hash(first.into_string()).verify("SamePassword123"));
        assert!(second.verify("SamePassword123"));
    }

    #[test]
    fn test_plaintext_is_never_stored() {
        let password = Password::new("plain-text-secret").unwrap();
        assert!(!password.as_str().contains("plain-text-secret"));
        assert!(password.as_str().starts_with("$argon2"));
    }

    #[test]
    fn test_too_short() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("12345678").is_ok());
    }

    #[tokio::test]
    async fn test_hash_and_match_off_runtime() {
        let password = Password::hash("SecurePassword123!".to_string()).await.unwrap();

        assert!(password.clone().matches("SecurePassword123!".to_string()).await);
        assert!(!password.matches("WrongPassword123".to_string()).await);
        assert!(Password::hash("short".to_string()).await.is_err());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let legacy = Password::from_hash("plaintext-password".to_string());
        assert!(!legacy.verify("plaintext-password"));
    }
}
