use crate::{config::Config, curation::CurationService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub curation: Arc<CurationService>,
    pub summarizer_model: String,
    pub summarizer_configured: bool,
}

impl AppState {
    pub fn new(
        curation: CurationService,
        summarizer_model: impl Into<String>,
        summarizer_configured: bool,
    ) -> Self {
        Self {
            curation: Arc::new(curation),
            summarizer_model: summarizer_model.into(),
            summarizer_configured,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            CurationService::from_config(config)?,
            config.gemini_model(),
            config.google_api_key().is_some(),
        ))
    }
}
