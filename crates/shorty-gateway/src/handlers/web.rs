//! HTML pages and the short code redirect.

use crate::error::PageError;
use crate::model::{ListQuery, ShortenForm};
use crate::state::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use shorty_core::{PageRequest, ShortCode, ShortenerError, UrlMapping};
use tracing::debug;
use url::Url;

pub const NOT_FOUND_MESSAGE: &str = "Shortcode not found";

/// One row of a rendered listing.
pub struct LinkRow {
    pub code: String,
    pub short_url: String,
    pub url: String,
}

impl LinkRow {
    fn new(mapping: UrlMapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_code.to_url(base_url),
            code: mapping.short_code.into(),
            url: mapping.original_url,
        }
    }
}

fn rows(mappings: Vec<UrlMapping>, base_url: &str) -> Vec<LinkRow> {
    mappings
        .into_iter()
        .map(|mapping| LinkRow::new(mapping, base_url))
        .collect()
}

/// Shorten form followed by one page of stored links.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub links: Vec<LinkRow>,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

/// Every stored link on a single page.
#[derive(Template, WebTemplate)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub links: Vec<LinkRow>,
}

/// `GET /?page=N`
pub async fn index_handler(
    Query(query): Query<ListQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<IndexTemplate, PageError> {
    let request = PageRequest::new(query.page.unwrap_or(1), state.per_page())
        .map_err(ShortenerError::from)?;

    let page = state.shortener().list(request).await?;

    Ok(IndexTemplate {
        links: rows(page.items, &state.base_url(&headers)),
        prev_page: page.prev_page,
        next_page: page.next_page,
    })
}

/// `POST /` with form field `url`; sends the browser back to the index.
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<Redirect, PageError> {
    state.shortener().create(form.url).await?;
    Ok(Redirect::to("/"))
}

/// `GET /list`
pub async fn list_page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ListTemplate, PageError> {
    let all = state.shortener().list_all().await?;

    Ok(ListTemplate {
        links: rows(all, &state.base_url(&headers)),
    })
}

/// `GET /{short_code}`
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, PageError> {
    let Ok(code) = ShortCode::new(short_code) else {
        return Ok((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response());
    };

    match state.shortener().resolve(&code).await? {
        Some(url) => {
            debug!(code = %code, url = %url, "redirecting");
            let location =
                redirect_location(&url).ok_or_else(|| PageError::InvalidRedirect(url.clone()))?;
            Ok((StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response())
        }
        None => Ok((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()),
    }
}

/// Header value for `Location`.
///
/// ASCII URLs are sent as stored. Non-ASCII hosts or paths are
/// re-serialized (punycode, percent-encoding) first.
fn redirect_location(url: &str) -> Option<HeaderValue> {
    if url.is_ascii() {
        return HeaderValue::from_str(url).ok();
    }

    Url::parse(url)
        .ok()
        .and_then(|normalized| HeaderValue::from_str(normalized.as_str()).ok())
        .or_else(|| HeaderValue::from_str(url).ok())
}
