use async_trait::async_trait;
use shorty_core::{
    paginate, Page, PageRequest, Repository, ShortCode, Shortener, ShortenerError, UrlMapping,
};
use shorty_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, trace};
use url::Url;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator`. Every creation makes
/// exactly one attempt: the generated code is inserted as is, with no lookup
/// beforehand and no retry afterwards. What happens on a collision is up to
/// the repository (the in-memory store overwrites, SQLite reports
/// [`ShortenerError::DuplicateKey`]).
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self::from_shared(Arc::new(repository), Arc::new(generator))
    }

    /// Creates a service over a repository that is also used elsewhere.
    pub fn from_shared(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Checks that the URL is a non-empty, well formed http(s) URL and
    /// returns it with surrounding whitespace removed.
    fn validate_url(url: &str) -> Result<&str, ShortenerError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let parsed =
            Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

        match parsed.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {scheme}"
            ))),
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn create(&self, original_url: String) -> Result<ShortCode, ShortenerError> {
        let url = Self::validate_url(&original_url)?;

        let short_code: ShortCode = self.generator.generate().into();

        self.repository.insert(&short_code, url.to_string()).await?;

        info!(code = %short_code, "created short code");
        Ok(short_code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>, ShortenerError> {
        trace!(code = %code, "resolving short code");

        let url = self.repository.get(code).await?;
        match &url {
            Some(url) => debug!(code = %code, url = %url, "resolved short code"),
            None => debug!(code = %code, "short code not found"),
        }
        Ok(url)
    }

    async fn list(&self, request: PageRequest) -> Result<Page<UrlMapping>, ShortenerError> {
        let all = self.repository.list_all().await?;
        Ok(paginate(all, request))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>, ShortenerError> {
        Ok(self.repository.list_all().await?)
    }
}
