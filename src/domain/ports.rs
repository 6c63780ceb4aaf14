use crate::domain::model::{DeliverySummary, Notification, PendingDelivery};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;

/// Persistence for the set of notification IDs already forwarded.
pub trait StateStore: Send + Sync {
    fn load_sent_ids(
        &self,
    ) -> impl std::future::Future<Output = Result<HashSet<String>>> + Send;
    fn save_sent_ids(
        &self,
        ids: &HashSet<String>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn github_api_url(&self) -> &str;
    fn github_token(&self) -> &str;
    fn telegram_api_url(&self) -> &str;
    fn telegram_token(&self) -> &str;
    fn telegram_chat_id(&self) -> &str;
    fn state_file(&self) -> &str;
    fn poll_interval(&self) -> Duration;
}

/// One poll cycle, split into the three stages the engine drives.
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Fetch notifications from the GitHub API.
    async fn extract(&self) -> Result<Vec<Notification>>;
    /// Filter to unread notifications not yet forwarded and format messages.
    async fn transform(&self, data: Vec<Notification>) -> Result<PendingDelivery>;
    /// Send pending messages to Telegram and persist the sent-ID set.
    async fn load(&self, pending: PendingDelivery) -> Result<DeliverySummary>;
}
