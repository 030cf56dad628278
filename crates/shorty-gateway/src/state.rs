use std::sync::Arc;

use axum::http::header::{HeaderName, HOST};
use axum::http::HeaderMap;
use shorty_core::page::DEFAULT_PER_PAGE;
use shorty_core::Shortener;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Option<String>,
    per_page: usize,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>) -> Self {
        Self {
            shortener,
            base_url: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Uses a fixed public base URL instead of the request `Host` header.
    pub fn with_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.base_url = Some(public_base_url.into());
        self
    }

    /// Sets the page size of the HTML listing.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// The base URL short links are rendered against.
    ///
    /// Without a configured base URL this is the request host, with the
    /// scheme taken from `X-Forwarded-Proto` when a proxy sets it.
    pub fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.clone();
        }

        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        format!("{}://{host}", request_scheme(headers))
    }
}

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

fn request_scheme(headers: &HeaderMap) -> &'static str {
    let forwarded = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim);

    match forwarded {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}
