use serde::Deserialize;
use thiserror::Error;

use crate::summarizer::model::{AIAnalysis, clamp_complexity};

#[derive(Error, Debug)]
pub enum AnalysisParseError {
    #[error("response is not valid analysis JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing or empty field '{0}'")]
    MissingField(&'static str),
}

/// Wire shape of the model's answer. Every field is optional so that a
/// missing field is reported by name instead of as a serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    tldr_summary: Option<String>,
    eli5_summary: Option<String>,
    technical_summary: Option<String>,
    suggested_tags: Option<Vec<String>>,
    complexity_score: Option<f64>,
}

/// Remove a surrounding markdown code fence, with or without a `json`
/// language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Parse and validate a model completion into an [`AIAnalysis`].
pub fn parse_analysis(completion: &str) -> Result<AIAnalysis, AnalysisParseError> {
    let raw: RawAnalysis = serde_json::from_str(strip_code_fence(completion))?;

    let tldr_summary = required_text(raw.tldr_summary, "tldrSummary")?;
    let eli5_summary = required_text(raw.eli5_summary, "eli5Summary")?;
    let technical_summary = required_text(raw.technical_summary, "technicalSummary")?;
    let suggested_tags = raw
        .suggested_tags
        .ok_or(AnalysisParseError::MissingField("suggestedTags"))?
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    let complexity_score = raw
        .complexity_score
        .ok_or(AnalysisParseError::MissingField("complexityScore"))?;

    Ok(AIAnalysis {
        tldr_summary,
        eli5_summary,
        technical_summary,
        suggested_tags,
        complexity_score: clamp_complexity(complexity_score),
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, AnalysisParseError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AnalysisParseError::MissingField(field))
}
