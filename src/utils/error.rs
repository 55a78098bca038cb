use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Subscription rejected ({status}): {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, message: Option<String> },

    #[error("Case data integrity error: {message}")]
    DataIntegrityError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::ApiError(_) => ErrorCategory::Network,
            PortfolioError::Rejected { .. } => ErrorCategory::Backend,
            PortfolioError::ConfigValidationError { .. }
            | PortfolioError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PortfolioError::CsvError(_)
            | PortfolioError::SerializationError(_)
            | PortfolioError::DataIntegrityError { .. } => ErrorCategory::Data,
            PortfolioError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼；任何錯誤都不會回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 請求未能完成（連線、逾時、回應無法解析），相對於後端明確拒絕
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PortfolioError::ApiError(_) | PortfolioError::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortfolioError::ApiError(_) => {
                "Could not reach the subscription service".to_string()
            }
            PortfolioError::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| "The subscription service rejected the request".to_string()),
            PortfolioError::ConfigValidationError { field, .. }
            | PortfolioError::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem with '{}'", field)
            }
            PortfolioError::DataIntegrityError { message } => {
                format!("Case data is inconsistent: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the backend URL and your network connection, then retry",
            ErrorCategory::Backend => "Correct the submitted details and try again",
            ErrorCategory::Configuration => "Review the TOML configuration file and command line flags",
            ErrorCategory::Data => "Verify the case dataset is well-formed JSON with unique ids",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
