use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shorty_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        match value {
            ShortenerError::InvalidUrl(_) | ShortenerError::InvalidPageRequest(_) => {
                AppError::BadRequest(value.to_string())
            }
            ShortenerError::InvalidShortCode(_) => AppError::NotFound(value.to_string()),
            ShortenerError::DuplicateKey(_) => AppError::Conflict(value.to_string()),
            ShortenerError::BackendUnavailable(_) | ShortenerError::Storage(_) => {
                AppError::Internal(value.to_string())
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors of the browser-facing routes, rendered as plain text.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("stored url is not a valid redirect target: {0}")]
    InvalidRedirect(String),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::Shortener(
                ShortenerError::InvalidUrl(_) | ShortenerError::InvalidPageRequest(_),
            ) => StatusCode::BAD_REQUEST,
            PageError::Shortener(ShortenerError::InvalidShortCode(_)) => StatusCode::NOT_FOUND,
            PageError::Shortener(
                ShortenerError::DuplicateKey(_)
                | ShortenerError::BackendUnavailable(_)
                | ShortenerError::Storage(_),
            )
            | PageError::InvalidRedirect(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "page request failed");
            return (status, "Internal Server Error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}
