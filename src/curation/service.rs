use anyhow::Context;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::curation::{CuratedArticle, CurationError};
use crate::extractor;
use crate::fetcher::Fetcher;
use crate::summarizer::{GeminiClient, Summarizer};

/// The curation pipeline: fetch, extract, normalize, summarize. Stateless;
/// concurrent calls share nothing but the HTTP connection pools.
#[derive(Clone)]
pub struct CurationService {
    fetcher: Fetcher,
    summarizer: Summarizer,
}

impl CurationService {
    pub fn new(fetcher: Fetcher, summarizer: Summarizer) -> Self {
        Self {
            fetcher,
            summarizer,
        }
    }

    /// Wire up the production collaborators: a browser-like fetcher and
    /// the Gemini client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher =
            Fetcher::new(config.fetch_timeout()).context("Failed to build HTTP fetcher")?;
        let gemini = GeminiClient::from_config(config).context("Failed to build Gemini client")?;
        if !gemini.is_configured() {
            warn!("GOOGLE_API_KEY not set, every analysis will use the fallback");
        }
        Ok(Self::new(fetcher, Summarizer::new(Arc::new(gemini))))
    }

    /// Run the pipeline once for `url`. Only fetch and content extraction
    /// can fail; the analysis is always present.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn curate(&self, url: &Url) -> Result<CuratedArticle, CurationError> {
        let page = self.fetcher.fetch(url).await.inspect_err(|e| {
            warn!(error = %e, retriable = e.should_retry(), "Failed to fetch article");
        })?;

        let article = extractor::extract(&page, url).inspect_err(|e| {
            warn!(error = %e, "Failed to extract article content");
        })?;

        let outcome = self.summarizer.analyze(&article.markdown).await;
        info!(
            title = %article.metadata.title,
            markdown_len = article.markdown.len(),
            generated = outcome.is_generated(),
            "Curated article"
        );

        Ok(CuratedArticle::new(url, article, outcome.into_analysis()))
    }
}
