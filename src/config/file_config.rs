use crate::domain::ports::ConfigProvider;
use crate::utils::error::{NotifierError, Result};
use crate::utils::validation::{
    validate_log_level, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_STATE_FILE: &str = "state/notifications.json";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Notifier configuration loaded from a TOML file.
///
/// Secrets are normally referenced as `${VAR}` placeholders and resolved
/// from the environment at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierFileConfig {
    pub github: GithubSection,
    pub telegram: TelegramSection,
    pub state: Option<StateSection>,
    pub polling: Option<PollingSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSection {
    pub token: String,
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    pub token: String,
    pub chat_id: String,
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSection {
    pub interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl NotifierFileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NotifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NotifierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values.
    /// Unset variables are left untouched so validation reports them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("github.token", &self.github.token)?;
        validate_non_empty_string("telegram.token", &self.telegram.token)?;
        validate_non_empty_string("telegram.chat_id", &self.telegram.chat_id)?;

        // An unresolved placeholder means the environment variable was unset.
        for (field, value) in [
            ("github.token", &self.github.token),
            ("telegram.token", &self.telegram.token),
            ("telegram.chat_id", &self.telegram.chat_id),
        ] {
            if value.starts_with("${") {
                return Err(NotifierError::MissingConfigError {
                    field: format!("{} ({})", field, value),
                });
            }
        }

        validate_url("github.api_url", self.github_api_url())?;
        validate_url("telegram.api_url", self.telegram_api_url())?;
        validate_path("state.path", self.state_file())?;
        validate_positive_number(
            "polling.interval_seconds",
            self.poll_interval_seconds(),
            1,
        )?;

        if let Some(level) = self.log_level() {
            validate_log_level("monitoring.log_level", level)?;
        }

        Ok(())
    }

    pub fn poll_interval_seconds(&self) -> u64 {
        self.polling
            .as_ref()
            .and_then(|p| p.interval_seconds)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for NotifierFileConfig {
    fn github_api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(DEFAULT_GITHUB_API_URL)
    }

    fn github_token(&self) -> &str {
        &self.github.token
    }

    fn telegram_api_url(&self) -> &str {
        self.telegram
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_API_URL)
    }

    fn telegram_token(&self) -> &str {
        &self.telegram.token
    }

    fn telegram_chat_id(&self) -> &str {
        &self.telegram.chat_id
    }

    fn state_file(&self) -> &str {
        self.state
            .as_ref()
            .map(|s| s.path.as_str())
            .unwrap_or(DEFAULT_STATE_FILE)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds())
    }
}

impl Validate for NotifierFileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
