use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single entry from `GET /notifications` on the GitHub API.
///
/// Only the fields the notifier acts on are modeled; the API returns more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Missing in the payload counts as read.
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub subject: Subject,
    pub repository: Repository,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Notification {
    /// Message text delivered to Telegram: `"title (owner/repo)"`.
    pub fn message_text(&self) -> String {
        format!("{} ({})", self.subject.title, self.repository.full_name)
    }
}

/// One message queued for delivery, keyed by its notification ID.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub notification_id: String,
    pub text: String,
}

/// Result of the transform stage: messages to send plus the sent-ID set
/// they were deduplicated against.
#[derive(Debug, Clone)]
pub struct PendingDelivery {
    pub messages: Vec<OutboundMessage>,
    pub sent_ids: HashSet<String>,
}

/// Counts for one completed poll cycle.
#[derive(Debug, Clone, Copy)]
pub struct DeliverySummary {
    pub delivered: usize,
}
