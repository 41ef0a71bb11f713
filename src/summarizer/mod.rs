pub mod gemini;
pub mod llm;
pub mod model;
pub mod parse;
pub mod prompt;

pub use gemini::GeminiClient;
pub use llm::{LanguageModel, LlmError};
pub use model::{AIAnalysis, AnalysisOutcome};
pub use parse::AnalysisParseError;

use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Summarization stage. Never fails: any problem with the model call or
/// its answer turns into [`AnalysisOutcome::Defaulted`].
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn LanguageModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    #[instrument(skip_all, fields(markdown_len = markdown.len()))]
    pub async fn analyze(&self, markdown: &str) -> AnalysisOutcome {
        let prompt = prompt::build_prompt(markdown);

        let completion = match self.model.generate(&prompt).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!(error = %e, "Language model call failed, using fallback analysis");
                return AnalysisOutcome::defaulted(e.to_string());
            }
        };

        match parse::parse_analysis(&completion) {
            Ok(analysis) => {
                info!(
                    tags = analysis.suggested_tags.len(),
                    complexity = analysis.complexity_score,
                    "Generated article analysis"
                );
                AnalysisOutcome::Generated(analysis)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    completion_len = completion.len(),
                    "Failed to parse analysis, using fallback analysis"
                );
                AnalysisOutcome::defaulted(e.to_string())
            }
        }
    }
}
