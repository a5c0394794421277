use thiserror::Error;

#[derive(Error, Debug)]
pub enum WrapError {
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Failed to fetch metrics for {address}: {message}")]
    AddressFetchFailed { address: String, message: String },

    #[error("invalid address or no data found")]
    NoDataFound,

    #[error("Metrics fetch timed out for {address}")]
    ProviderTimeout { address: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl WrapError {
    pub fn fetch_failed(address: &str, message: impl Into<String>) -> Self {
        WrapError::AddressFetchFailed {
            address: address.to_string(),
            message: message.into(),
        }
    }

    /// Transient failures worth another attempt: timeouts, connection
    /// problems, throttling and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            WrapError::ProviderTimeout { .. } => true,
            WrapError::HttpError(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                match e.status() {
                    Some(status) => status.is_server_error() || status.as_u16() == 429,
                    None => e.is_request(),
                }
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WrapError>;
