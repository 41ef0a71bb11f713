pub mod content;
pub mod language;
pub mod markdown;
pub mod metadata;
pub mod model;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use metadata::{ExtractedMetadata, UNTITLED_ARTICLE};
pub use model::ExtractedArticle;

use scraper::Html;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::PageResponse;

/// Normalized content shorter than this (trimmed, in characters) means
/// extraction failed.
pub const MIN_CONTENT_LENGTH: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Could not extract sufficient content from the article")]
    InsufficientContent { length: usize },
}

/// Extract metadata and the normalized body from a fetched page.
/// `source_url` is the URL that was requested.
pub fn extract(page: &PageResponse, source_url: &Url) -> Result<ExtractedArticle, ExtractError> {
    extract_html(&page.body_utf8, source_url, &page.url_final)
}

#[instrument(skip_all, fields(url = %source_url))]
pub fn extract_html(
    html: &str,
    source_url: &Url,
    base_url: &Url,
) -> Result<ExtractedArticle, ExtractError> {
    let mut document = Html::parse_document(html);

    // Headlines and bylines often sit inside <header>, so metadata is read
    // before noise removal.
    let metadata = metadata::extract_metadata(&document, source_url, base_url);

    let removed = content::remove_noise(&mut document);
    let markdown = content::select_main_content(&document)
        .map(|main| markdown::to_markdown(&main.html))
        .unwrap_or_default();

    let length = markdown.trim().chars().count();
    debug!(removed, length, "Normalized article content");
    if length < MIN_CONTENT_LENGTH {
        return Err(ExtractError::InsufficientContent { length });
    }

    let language = language::detect_language(&markdown);

    Ok(ExtractedArticle {
        metadata,
        markdown,
        language,
    })
}
