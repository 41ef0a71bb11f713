use serde::{Deserialize, Serialize};

use crate::extractor::metadata::ExtractedMetadata;

/// Output of the extraction stages: metadata plus the normalized body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub metadata: ExtractedMetadata,
    /// Cleaned article body as markdown. Never shorter than the minimum
    /// content length once trimmed.
    pub markdown: String,
    pub language: Option<String>,
}
