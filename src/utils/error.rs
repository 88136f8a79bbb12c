use thiserror::Error;

/// 供應商層級的失敗原因。只在 orchestrator 內部記錄，不會傳回給呼叫端。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplierError {
    #[error("Supplier transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    #[error("Supplier response format error: {message}")]
    Format { message: String },

    #[error("Supplier did not respond within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Supplier task aborted: {message}")]
    Panicked { message: String },
}

impl SupplierError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// 給日誌使用的簡短分類
    pub fn kind(&self) -> &'static str {
        match self {
            SupplierError::Transport { .. } => "transport",
            SupplierError::Format { .. } => "format",
            SupplierError::Timeout { .. } => "timeout",
            SupplierError::Panicked { .. } => "panicked",
        }
    }
}

impl From<reqwest::Error> for SupplierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SupplierError::format(err.to_string());
        }
        match err.status() {
            Some(status) => SupplierError::status(status.as_u16(), err.to_string()),
            None => SupplierError::transport(err.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum FlightSearchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid search criteria '{field}': {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlightSearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlightSearchError::ConfigError { .. }
            | FlightSearchError::ConfigValidationError { .. }
            | FlightSearchError::InvalidConfigValueError { .. }
            | FlightSearchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FlightSearchError::ValidationError { .. } => ErrorCategory::Input,
            FlightSearchError::IoError(_) | FlightSearchError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FlightSearchError::IoError(_) => {
                "Check that the configuration file exists and is readable".to_string()
            }
            FlightSearchError::SerializationError(_) => {
                "Report this issue, the search result could not be serialized".to_string()
            }
            FlightSearchError::ConfigError { .. }
            | FlightSearchError::ConfigValidationError { .. } => {
                "Review the supplier configuration file against the documented format".to_string()
            }
            FlightSearchError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            FlightSearchError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            FlightSearchError::ValidationError { field, .. } => {
                format!("Adjust the '{}' search parameter and retry", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid search request: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightSearchError>;
