use thiserror::Error;

/// Errors related to the core value types of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
}

/// Errors surfaced by [`Repository`](crate::Repository) implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("short code already exists: {0}")]
    DuplicateKey(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
            CoreError::InvalidPageRequest(message) => Self::InvalidPageRequest(message),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::DuplicateKey(code),
            StorageError::Unavailable(message) => Self::BackendUnavailable(message),
            other => Self::Storage(other.to_string()),
        }
    }
}
