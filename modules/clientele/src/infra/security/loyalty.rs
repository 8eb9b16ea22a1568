use async_trait::async_trait;

use crate::domain::model::Client;
use crate::domain::ports::LoyaltyNotifier;

/// Default notifier: records the dispatch in the log. A mail-backed
/// implementation plugs in behind the same port.
pub struct LoggingLoyaltyNotifier;

impl LoggingLoyaltyNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingLoyaltyNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoyaltyNotifier for LoggingLoyaltyNotifier {
    async fn send_loyalty_card(&self, client: &Client, email: &str) -> anyhow::Result<()> {
        tracing::info!(client_id = client.id, email, "Loyalty card dispatched");
        Ok(())
    }
}
