use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored mapping from a short code to its original URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub short_code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
}

impl UrlMapping {
    pub fn new(short_code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
        }
    }
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the original URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Returns every stored mapping.
    ///
    /// Order is backend specific; see the implementation docs.
    async fn list_all(&self) -> Result<Vec<UrlMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping.
    ///
    /// Backends disagree on an existing code: durable storage returns
    /// `Err(StorageError::Conflict)`, the in-memory store overwrites.
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<()>;
}
