use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("GitHub API returned status {status}")]
    GitHubApi { status: u16 },

    #[error("Telegram API returned status {status}: {description}")]
    TelegramApi { status: u16, description: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, NotifierError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Logged, cycle continues.
    Low,
    /// Transient; the next poll cycle retries.
    Medium,
    /// Bad input or payload; needs operator attention.
    High,
    /// Cannot run at all (state file unwritable, broken config).
    Critical,
}

impl NotifierError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NotifierError::HttpError(_)
            | NotifierError::GitHubApi { .. }
            | NotifierError::TelegramApi { .. } => ErrorSeverity::Medium,
            NotifierError::SerializationError(_) => ErrorSeverity::High,
            NotifierError::IoError(_)
            | NotifierError::InvalidConfigValueError { .. }
            | NotifierError::MissingConfigError { .. }
            | NotifierError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NotifierError::HttpError(e) => format!("Could not reach the remote API: {}", e),
            NotifierError::GitHubApi { status } => {
                format!("GitHub rejected the notifications request (HTTP {})", status)
            }
            NotifierError::TelegramApi { status, description } => format!(
                "Telegram rejected the message (HTTP {}): {}",
                status, description
            ),
            NotifierError::IoError(e) => format!("Could not access the state file: {}", e),
            NotifierError::SerializationError(e) => {
                format!("Unexpected payload or state format: {}", e)
            }
            NotifierError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            NotifierError::MissingConfigError { field } => {
                format!("Required configuration '{}' is not set", field)
            }
            NotifierError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' failed to load: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NotifierError::HttpError(_) => {
                "Check network connectivity and the configured API URLs"
            }
            NotifierError::GitHubApi { .. } => {
                "Verify GH_TOKEN is valid and has the notifications scope"
            }
            NotifierError::TelegramApi { .. } => {
                "Verify TELEGRAM_TOKEN and that the bot can post to TELEGRAM_CHAT_ID"
            }
            NotifierError::IoError(_) => {
                "Ensure the state directory exists and is writable by the process"
            }
            NotifierError::SerializationError(_) => {
                "Delete or repair the state file if it was edited by hand"
            }
            NotifierError::InvalidConfigValueError { .. }
            | NotifierError::MissingConfigError { .. }
            | NotifierError::ConfigValidationError { .. } => {
                "Fix the configuration (flags, environment variables, or config file) and restart"
            }
        }
    }
}
