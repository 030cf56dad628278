use crate::error::ShortenerError;
use crate::page::{Page, PageRequest};
use crate::repository::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a mapping for `original_url` and returns the generated short code.
    async fn create(&self, original_url: String) -> Result<ShortCode>;

    /// Resolves a short code to its original URL.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Returns one page of the stored mappings.
    async fn list(&self, request: PageRequest) -> Result<Page<UrlMapping>>;

    /// Returns every stored mapping.
    async fn list_all(&self) -> Result<Vec<UrlMapping>>;
}
