use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::error::DomainError;
use crate::domain::ports::PasswordHasher;

/// Argon2id hasher with the crate's default parameters.
pub struct ArgonPasswordHasher;

impl ArgonPasswordHasher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArgonPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for ArgonPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = ArgonPasswordHasher::new();
        let hash = hasher.hash("passer123").unwrap();
        assert!(hasher.verify("passer123", &hash));
        assert!(!hasher.verify("autre", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let hasher = ArgonPasswordHasher::new();
        assert!(!hasher.verify("passer123", "not-a-hash"));
    }
}
