use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::curation::dtos::CurationResponse;
use crate::extractor::ExtractError;
use crate::fetcher::FetchError;

/// Failures visible to the caller. Summarization problems never show up
/// here; they are absorbed into the fallback analysis.
#[derive(Error, Debug)]
pub enum CurationError {
    #[error("URL is required")]
    MissingUrl,

    #[error("URL too long")]
    UrlTooLong,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to fetch article: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl CurationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::UrlTooLong | Self::InvalidUrl(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Fetch(_) | Self::Extract(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CurationError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(CurationResponse::failure(self.to_string())),
        )
            .into_response()
    }
}
