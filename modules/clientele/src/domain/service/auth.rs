use std::sync::Arc;

use rand::RngCore;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::model::{ACTIVE_OUI, User};
use crate::domain::ports::PasswordHasher;
use crate::domain::repo::{TokensRepository, UsersRepository};

/// Authentication gate: opaque bearer tokens, issued on login and valid until
/// explicitly revoked. Only the sha256 digest of a token is stored.
pub struct AuthService<UR: UsersRepository, TR: TokensRepository> {
    db: Arc<DatabaseConnection>,
    users: Arc<UR>,
    tokens: Arc<TR>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<UR: UsersRepository, TR: TokensRepository> AuthService<UR, TR> {
    pub fn new(
        db: Arc<DatabaseConnection>,
        users: Arc<UR>,
        tokens: Arc<TR>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            db,
            users,
            tokens,
            hasher,
        }
    }

    /// Tried once, no retry. Returns the opaque token to hand to the client.
    #[instrument(skip(self, password))]
    pub async fn login(&self, login: &str, password: &str) -> Result<(String, User), DomainError> {
        let Some(credentials) = self.users.find_credentials(self.db.as_ref(), login).await?
        else {
            return Err(DomainError::Unauthorized);
        };

        if !self.hasher.verify(password, &credentials.password_hash) {
            return Err(DomainError::Unauthorized);
        }
        if credentials.user.active != ACTIVE_OUI {
            tracing::debug!(login, "Login refused: account inactive");
            return Err(DomainError::Unauthorized);
        }

        let token = generate_token();
        self.tokens
            .insert(self.db.as_ref(), credentials.user.id, &digest(&token))
            .await?;

        tracing::info!(user_id = credentials.user.id, "Login succeeded");
        Ok((token, credentials.user))
    }

    /// Revokes the session backing the token.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        let revoked = self.tokens.revoke(self.db.as_ref(), &digest(token)).await?;
        if !revoked {
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }

    /// Resolve a bearer token to its user, for the route-group middleware.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        self.tokens
            .find_user(self.db.as_ref(), &digest(token))
            .await?
            .ok_or(DomainError::Unauthorized)
    }
}

/// 32 random bytes, hex-encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Tokens are stored hashed; the plaintext only ever transits to the client.
fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_opaque() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(digest("abc"), digest("abc"));
        assert_ne!(digest("abc"), digest("abd"));
    }
}
