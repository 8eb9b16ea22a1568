use async_trait::async_trait;

use super::error::DomainError;
use super::model::Client;

/// Credential-hashing collaborator. Hashing and verification are delegated so
/// the domain never touches a concrete algorithm.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Post-commit loyalty-card dispatch. Runs outside the creation transaction;
/// a failure is logged by the caller and never affects the creation result.
#[async_trait]
pub trait LoyaltyNotifier: Send + Sync {
    async fn send_loyalty_card(&self, client: &Client, email: &str) -> anyhow::Result<()>;
}
