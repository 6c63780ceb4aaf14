use crate::core::{
    ConfigProvider, DeliverySummary, Notification, OutboundMessage, PendingDelivery, StateStore,
};
use crate::utils::error::{NotifierError, Result};
use reqwest::Client;

const USER_AGENT: &str = "github-telegram-notifier";

/// One poll cycle against the real GitHub and Telegram APIs.
pub struct NotifyPipeline<S: StateStore, C: ConfigProvider> {
    store: S,
    config: C,
    client: Client,
}

impl<S: StateStore, C: ConfigProvider> NotifyPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self {
            store,
            config,
            client: Client::new(),
        }
    }

    async fn send_telegram_message(&self, text: &str) -> Result<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.telegram_api_url(),
            self.config.telegram_token()
        );
        let body = serde_json::json!({
            "chat_id": self.config.telegram_chat_id(),
            "text": text,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Telegram error bodies carry a human-readable description.
            let description = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("description")
                        .and_then(|d| d.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "no description".to_string());

            return Err(NotifierError::TelegramApi {
                status: status.as_u16(),
                description,
            });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: StateStore, C: ConfigProvider> super::Pipeline for NotifyPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Notification>> {
        let url = format!("{}/notifications", self.config.github_api_url());
        tracing::debug!("Fetching notifications from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.config.github_token()),
            )
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("GitHub response status: {}", status);

        if !status.is_success() {
            return Err(NotifierError::GitHubApi {
                status: status.as_u16(),
            });
        }

        let notifications: Vec<Notification> = response.json().await?;
        Ok(notifications)
    }

    async fn transform(&self, data: Vec<Notification>) -> Result<PendingDelivery> {
        let sent_ids = self.store.load_sent_ids().await?;

        let messages = data
            .iter()
            .filter(|n| n.unread)
            .filter(|n| !sent_ids.contains(&n.id))
            .map(|n| OutboundMessage {
                notification_id: n.id.clone(),
                text: n.message_text(),
            })
            .collect();

        Ok(PendingDelivery { messages, sent_ids })
    }

    async fn load(&self, pending: PendingDelivery) -> Result<DeliverySummary> {
        let mut sent_ids = pending.sent_ids;
        let mut delivered = 0;

        for message in pending.messages {
            tracing::info!("New notification: {}", message.text);

            if let Err(e) = self.send_telegram_message(&message.text).await {
                // Keep the IDs that already went out so they are not resent.
                self.store.save_sent_ids(&sent_ids).await?;
                return Err(e);
            }

            sent_ids.insert(message.notification_id);
            delivered += 1;
        }

        self.store.save_sent_ids(&sent_ids).await?;
        Ok(DeliverySummary { delivered })
    }
}
