use thiserror::Error;
use vtscope_api::ApiError;

#[derive(Error, Debug)]
pub enum VtscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cache encoding error: {0}")]
    CacheEncode(#[from] rmp_serde::encode::Error),
    #[error("Cache decoding error: {0}")]
    CacheDecode(#[from] rmp_serde::decode::Error),
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("No schema source configured (set apiUrl or schemaFile)")]
    NoSource,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ApiError> for VtscopeError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unavailable(msg) => VtscopeError::Fetch(msg),
            ApiError::Malformed { origin, reason } => {
                VtscopeError::Fetch(format!("{}: {}", origin, reason))
            }
            other => VtscopeError::Internal(other.to_string()),
        }
    }
}

impl From<VtscopeError> for ApiError {
    fn from(err: VtscopeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for VtscopeError {
    fn from(err: reqwest::Error) -> Self {
        VtscopeError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VtscopeError>;
