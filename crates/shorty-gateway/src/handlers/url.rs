use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, GetUrlResponse, ListQuery, ListUrlsResponse};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use shorty_core::page::DEFAULT_PER_PAGE;
use shorty_core::{PageRequest, ShortCode, ShortenerError};

pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let code = state
        .shortener()
        .create(request.original_url.clone())
        .await?;

    let response = CreateUrlResponse {
        short_url: code.to_url(&state.base_url(&headers)),
        short_code: code.into(),
        original_url: request.original_url,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetUrlResponse>> {
    let code = ShortCode::new(short_code).map_err(ShortenerError::from)?;

    match state.shortener().resolve(&code).await? {
        Some(original_url) => Ok(Json(GetUrlResponse {
            short_code: code.into(),
            original_url,
        })),
        None => Err(AppError::NotFound(format!("short code not found: {code}"))),
    }
}

pub async fn list_urls_handler(
    Query(query): Query<ListQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListUrlsResponse>> {
    let request = PageRequest::new(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )
    .map_err(ShortenerError::from)?;

    let page = state.shortener().list(request).await?;
    Ok(Json(ListUrlsResponse::from_page(
        page,
        &state.base_url(&headers),
    )))
}
