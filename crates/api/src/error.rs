#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Schema source unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed payload from {origin}: {reason}")]
    Malformed { origin: String, reason: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
