use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP client request failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Notification error: {message}")]
    Notification { message: String },

    #[error("Unknown submission kind: {0}")]
    UnknownKind(String),

    #[error("Too many requests")]
    RateLimited,
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected rejections (bad payloads, throttled clients)
    Low,
    /// Transient failures that may succeed on retry
    Medium,
    /// Request-level failures worth alerting on
    High,
    /// Startup/configuration failures, the process cannot serve
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Validation,
    Storage,
    Notification,
    Network,
    Internal,
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => ErrorCategory::Config,
            Self::Validation { .. } | Self::UnknownKind(_) | Self::RateLimited => {
                ErrorCategory::Validation
            }
            Self::Storage { .. } | Self::Io(_) => ErrorCategory::Storage,
            Self::Notification { .. } => ErrorCategory::Notification,
            Self::HttpClient(_) => ErrorCategory::Network,
            Self::Serialization(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation { .. } | Self::UnknownKind(_) | Self::RateLimited => {
                ErrorSeverity::Low
            }
            Self::HttpClient(_) | Self::Notification { .. } => ErrorSeverity::Medium,
            Self::Storage { .. } | Self::Io(_) | Self::Serialization(_) => ErrorSeverity::High,
            Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidConfigValue { field, .. } => {
                format!("Fix the value of '{}' and restart", field)
            }
            Self::MissingConfig { field } => {
                format!("Provide '{}' via CLI flag, config file or environment", field)
            }
            Self::Validation { field, .. } => {
                format!("Correct the '{}' field and resubmit", field)
            }
            Self::Storage { .. } | Self::Io(_) => {
                "Check that the data directory exists and is writable".to_string()
            }
            Self::Notification { .. } | Self::HttpClient(_) => {
                "Check the mail API endpoint and credentials".to_string()
            }
            Self::Serialization(_) => "Inspect the offending document in the logs".to_string(),
            Self::UnknownKind(_) => {
                "Use one of: contact, roi, culture-quiz, quiz-email".to_string()
            }
            Self::RateLimited => "Slow down and retry after the rate window".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { field, reason } => format!("{}: {}", field, reason),
            Self::UnknownKind(kind) => format!("unknown submission kind '{}'", kind),
            Self::RateLimited => "too many requests, please retry later".to_string(),
            Self::Storage { .. } | Self::Io(_) | Self::Serialization(_) => {
                "the submission could not be saved".to_string()
            }
            other => other.to_string(),
        }
    }
}
