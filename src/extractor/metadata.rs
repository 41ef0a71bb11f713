use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractor::strategy::{Strategy, first_accepted};

/// Title used when no candidate is long enough.
pub const UNTITLED_ARTICLE: &str = "Untitled Article";

const MIN_TITLE_CHARS: usize = 10;
const MIN_AUTHOR_CHARS: usize = 2;

const TITLE_STRATEGIES: &[Strategy] = &[
    Strategy::text("h1"),
    Strategy::text("[data-testid='headline']"),
    Strategy::text(".article-title"),
    Strategy::text(".entry-title"),
    Strategy::text("title"),
];

const AUTHOR_STRATEGIES: &[Strategy] = &[
    Strategy::text("[data-testid='author-name']"),
    Strategy::text(".author-name"),
    Strategy::text(".byline-author"),
    Strategy::text("[rel='author']"),
    Strategy::text(".article-author"),
];

const SITE_NAME_STRATEGIES: &[Strategy] =
    &[Strategy::attr("meta[property='og:site_name']", "content")];

const DATE_STRATEGIES: &[Strategy] = &[
    Strategy::attr("meta[property='article:published_time']", "content"),
    Strategy::attr("meta[name='publishdate']", "content"),
    Strategy::attr("time[datetime]", "datetime"),
    Strategy::text(".publication-date"),
    Strategy::text(".article-date"),
];

const IMAGE_STRATEGIES: &[Strategy] = &[
    Strategy::attr("meta[property='og:image']", "content"),
    Strategy::attr("meta[name='twitter:image']", "content"),
    Strategy::attr(".article-image img", "src"),
    Strategy::attr(".featured-image img", "src"),
    Strategy::attr("img[src*='featured']", "src"),
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y", "%B %d %Y"];

/// Article metadata. Every field except the title may be absent; none of
/// them can fail the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub title: String,
    pub author_name: Option<String>,
    pub source_name: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub image_url: Option<Url>,
}

/// Extract metadata from the untouched document. `source_url` is the URL the
/// caller asked for, `base_url` the one relative links resolve against
/// (they differ after a redirect).
pub fn extract_metadata(document: &Html, source_url: &Url, base_url: &Url) -> ExtractedMetadata {
    ExtractedMetadata {
        title: extract_title(document),
        author_name: extract_author(document),
        source_name: extract_source_name(document, source_url),
        publication_date: extract_publication_date(document),
        image_url: extract_image_url(document, base_url),
    }
}

pub fn extract_title(document: &Html) -> String {
    first_accepted(document, TITLE_STRATEGIES, |candidate| {
        (candidate.chars().count() > MIN_TITLE_CHARS).then(|| candidate.to_string())
    })
    .unwrap_or_else(|| UNTITLED_ARTICLE.to_string())
}

pub fn extract_author(document: &Html) -> Option<String> {
    first_accepted(document, AUTHOR_STRATEGIES, |candidate| {
        (candidate.chars().count() > MIN_AUTHOR_CHARS).then(|| candidate.to_string())
    })
}

pub fn extract_source_name(document: &Html, source_url: &Url) -> Option<String> {
    first_accepted(document, SITE_NAME_STRATEGIES, |candidate| {
        Some(candidate.to_string())
    })
    .or_else(|| source_name_from_host(source_url))
}

/// `https://www.nature.com/x` becomes `Nature.com`.
pub fn source_name_from_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let mut chars = host.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

pub fn extract_publication_date(document: &Html) -> Option<NaiveDate> {
    first_accepted(document, DATE_STRATEGIES, parse_publication_date)
}

/// Parse the date formats publishers actually put in their markup.
/// Timestamps with an offset are normalised to their UTC calendar date.
pub fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

pub fn extract_image_url(document: &Html, base_url: &Url) -> Option<Url> {
    first_accepted(document, IMAGE_STRATEGIES, |candidate| {
        base_url.join(candidate).ok()
    })
}
