use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpError {
    #[error("no either IDs or filter provided")]
    MissingInput,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Service responded with {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("no filter {name} found")]
    FilterNotFound { name: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入或配置問題，未發出任何請求
    Input,
    /// 遠端服務或網路失敗
    Service,
    /// 本地 IO
    System,
}

impl RpError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RpError::MissingInput
            | RpError::UrlError(_)
            | RpError::ConfigError { .. }
            | RpError::MissingConfigError { .. }
            | RpError::InvalidConfigValueError { .. } => ErrorCategory::Input,
            RpError::ApiError(_) | RpError::ServiceError { .. } | RpError::FilterNotFound { .. } => {
                ErrorCategory::Service
            }
            RpError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Service | ErrorCategory::System => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RpError>;
