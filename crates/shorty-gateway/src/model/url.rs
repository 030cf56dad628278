use serde::{Deserialize, Serialize};
use shorty_core::{Page, UrlMapping};

/// Body of the HTML shorten form.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    pub url: String,
}

/// `?page=&per_page=` on listing routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub original_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetUrlResponse {
    pub short_code: String,
    pub original_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlItem {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

impl UrlItem {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_code.to_url(base_url),
            short_code: mapping.short_code.into(),
            original_url: mapping.original_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUrlsResponse {
    pub items: Vec<UrlItem>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl ListUrlsResponse {
    pub fn from_page(page: Page<UrlMapping>, base_url: &str) -> Self {
        Self {
            items: page
                .items
                .into_iter()
                .map(|mapping| UrlItem::from_mapping(mapping, base_url))
                .collect(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            has_prev: page.has_prev,
            has_next: page.has_next,
            prev_page: page.prev_page,
            next_page: page.next_page,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
