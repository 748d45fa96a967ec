use thiserror::Error;

#[derive(Error, Debug)]
pub enum QiwiError {
    #[error("Unknown {kind}: {value}")]
    ParameterLookup { kind: &'static str, value: String },

    #[error("Invalid parameter '{field}' = '{value}': {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("API error (HTTP {status}){}: {message}", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Unexpected field '{field}' for {model}")]
    UnexpectedField { model: &'static str, field: String },

    #[error("Unexpected response shape: expected {expected}")]
    UnexpectedShape { expected: &'static str },

    #[error("Session is closed")]
    SessionClosed,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref().map(|c| format!(" [{}]", c)).unwrap_or_default()
}

impl From<reqwest::Error> for QiwiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QiwiError::Timeout(err)
        } else {
            QiwiError::Transport(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Network,
    Api,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QiwiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QiwiError::ParameterLookup { .. }
            | QiwiError::InvalidParameter { .. }
            | QiwiError::SessionClosed => ErrorCategory::Usage,
            QiwiError::Transport(_) | QiwiError::Timeout(_) => ErrorCategory::Network,
            QiwiError::Api { .. } => ErrorCategory::Api,
            QiwiError::Deserialization(_)
            | QiwiError::UnexpectedField { .. }
            | QiwiError::UnexpectedShape { .. } => ErrorCategory::Data,
            QiwiError::InvalidHeader(_)
            | QiwiError::IoError(_)
            | QiwiError::ConfigError { .. }
            | QiwiError::InvalidConfigValueError { .. }
            | QiwiError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QiwiError::Timeout(_) | QiwiError::Transport(_) => ErrorSeverity::Medium,
            QiwiError::Api { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            QiwiError::Api { .. }
            | QiwiError::ParameterLookup { .. }
            | QiwiError::InvalidParameter { .. }
            | QiwiError::Deserialization(_)
            | QiwiError::UnexpectedField { .. }
            | QiwiError::UnexpectedShape { .. } => ErrorSeverity::High,
            QiwiError::SessionClosed
            | QiwiError::InvalidHeader(_)
            | QiwiError::IoError(_)
            | QiwiError::ConfigError { .. }
            | QiwiError::InvalidConfigValueError { .. }
            | QiwiError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 是否為暫時性錯誤（呼叫端可自行決定是否重試）
    pub fn is_transient(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            QiwiError::ParameterLookup { kind, .. } => {
                format!("Check the {} value against the supported aliases", kind)
            }
            QiwiError::InvalidParameter { field, .. } => {
                format!("Adjust the '{}' argument and try again", field)
            }
            QiwiError::Transport(_) => "Check network connectivity and the API URL".to_string(),
            QiwiError::Timeout(_) => {
                "The API did not answer in time; increase timeout_seconds or retry later"
                    .to_string()
            }
            QiwiError::Api { status: 401, .. } | QiwiError::Api { status: 403, .. } => {
                "Check that the API token is valid and has the required permissions".to_string()
            }
            QiwiError::Api { status, .. } if *status >= 500 => {
                "The provider is having trouble; retry later".to_string()
            }
            QiwiError::Api { .. } => "Check the request arguments".to_string(),
            QiwiError::Deserialization(_)
            | QiwiError::UnexpectedField { .. }
            | QiwiError::UnexpectedShape { .. } => {
                "The API response format changed; update the client models".to_string()
            }
            QiwiError::SessionClosed => {
                "Create a new client; a closed session cannot be reused".to_string()
            }
            QiwiError::InvalidHeader(_) => {
                "Check the token and content type for invalid characters".to_string()
            }
            QiwiError::IoError(_) => "Check the file path and permissions".to_string(),
            QiwiError::ConfigError { .. }
            | QiwiError::InvalidConfigValueError { .. }
            | QiwiError::MissingConfigError { .. } => {
                "Fix the configuration file or command line arguments".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QiwiError::Api { status, message, .. } => {
                format!("QIWI API rejected the request ({}): {}", status, message)
            }
            QiwiError::Timeout(_) => "QIWI API request timed out".to_string(),
            QiwiError::Transport(_) => "Could not reach the QIWI API".to_string(),
            QiwiError::SessionClosed => "The client session was already closed".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QiwiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_code() {
        let err = QiwiError::Api {
            status: 400,
            code: Some("QWPRC-220".to_string()),
            message: "Недостаточно средств".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 400) [QWPRC-220]: Недостаточно средств"
        );
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_server_errors_are_transient() {
        let err = QiwiError::Api {
            status: 503,
            code: None,
            message: "unavailable".to_string(),
        };
        assert!(err.is_transient());
        assert!(!QiwiError::SessionClosed.is_transient());
    }

    #[test]
    fn test_session_closed_is_usage_error() {
        let err = QiwiError::SessionClosed;
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
