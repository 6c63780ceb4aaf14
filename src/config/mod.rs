pub mod file_config;
pub mod state;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    self, validate_non_empty_string, validate_path, validate_positive_number, validate_url,
    Validate,
};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "github-telegram-notifier")]
#[command(about = "Forwards unread GitHub notifications to a Telegram chat")]
pub struct CliConfig {
    /// GitHub token with the notifications scope
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Telegram chat the notifications are posted to
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "GH_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// File the sent-notification IDs are persisted to
    #[arg(long, env = "NOTIFICATIONS_FILE", default_value = "state/notifications.json")]
    pub state_file: String,

    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value = "10")]
    pub poll_interval_seconds: u64,

    /// Load configuration from a TOML file instead of flags/environment
    #[arg(long)]
    pub config: Option<String>,

    /// Run one poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON (for container log collectors)
    #[arg(long)]
    pub log_json: bool,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl ConfigProvider for CliConfig {
    fn github_api_url(&self) -> &str {
        &self.github_api_url
    }

    fn github_token(&self) -> &str {
        self.github_token.as_deref().unwrap_or("")
    }

    fn telegram_api_url(&self) -> &str {
        &self.telegram_api_url
    }

    fn telegram_token(&self) -> &str {
        self.telegram_token.as_deref().unwrap_or("")
    }

    fn telegram_chat_id(&self) -> &str {
        self.telegram_chat_id.as_deref().unwrap_or("")
    }

    fn state_file(&self) -> &str {
        &self.state_file
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let token = validation::validate_required_field("GH_TOKEN", &self.github_token)?;
        validate_non_empty_string("GH_TOKEN", token)?;

        let token = validation::validate_required_field("TELEGRAM_TOKEN", &self.telegram_token)?;
        validate_non_empty_string("TELEGRAM_TOKEN", token)?;

        let chat_id =
            validation::validate_required_field("TELEGRAM_CHAT_ID", &self.telegram_chat_id)?;
        validate_non_empty_string("TELEGRAM_CHAT_ID", chat_id)?;

        validate_url("GH_API_URL", &self.github_api_url)?;
        validate_url("TELEGRAM_API_URL", &self.telegram_api_url)?;
        validate_path("NOTIFICATIONS_FILE", &self.state_file)?;
        validate_positive_number("POLL_INTERVAL_SECONDS", self.poll_interval_seconds, 1)?;

        if let Some(level) = &self.log_level {
            validation::validate_log_level("LOG_LEVEL", level)?;
        }

        Ok(())
    }
}
