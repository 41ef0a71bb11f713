use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::curation::{CurationError, text};
use crate::extractor::ExtractedArticle;
use crate::summarizer::AIAnalysis;

const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CurationRequest {
    /// Absolute http(s) URL of the article to curate.
    #[serde(default)]
    pub url: Option<String>,
}

impl CurationRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Trim and parse the URL. Scheme and reachability are left to the fetcher.
    pub fn validate(&self) -> Result<Url, CurationError> {
        let url = self.url.as_deref().map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return Err(CurationError::MissingUrl);
        }
        if url.len() > MAX_URL_LENGTH {
            return Err(CurationError::UrlTooLong);
        }

        Url::parse(url).map_err(|e| CurationError::InvalidUrl(e.to_string()))
    }
}

/// A curated article, ready to be stored as a newsletter draft.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CuratedArticle {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub suggested_slug: String,
    pub excerpt: String,
    pub ai_analysis: AIAnalysis,
    pub original_markdown: String,
    pub curated_at: DateTime<Utc>,
}

impl CuratedArticle {
    pub fn new(source_url: &Url, article: ExtractedArticle, ai_analysis: AIAnalysis) -> Self {
        let ExtractedArticle {
            metadata,
            markdown,
            language,
        } = article;

        Self {
            suggested_slug: text::slugify(&metadata.title),
            excerpt: text::excerpt(markdown.trim()),
            title: metadata.title,
            author_name: metadata.author_name,
            source_name: metadata.source_name,
            source_url: source_url.to_string(),
            publication_date: metadata.publication_date,
            image_url: metadata.image_url.map(String::from),
            language,
            ai_analysis,
            original_markdown: markdown,
            curated_at: Utc::now(),
        }
    }
}

/// Response envelope for `POST /api/curate`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CuratedArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CurationResponse {
    pub fn success(article: CuratedArticle) -> Self {
        Self {
            success: true,
            data: Some(article),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
