use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_COMPLEXITY: u8 = 1;
pub const MAX_COMPLEXITY: u8 = 5;

/// Multi-level summary of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AIAnalysis {
    /// One sentence capturing the core finding.
    pub tldr_summary: String,
    /// Analogy-driven explanation for non-experts.
    pub eli5_summary: String,
    /// Three to four sentences for a scientific audience.
    pub technical_summary: String,
    pub suggested_tags: Vec<String>,
    /// 1 (general public) to 5 (deep expert only).
    #[schema(minimum = 1, maximum = 5)]
    pub complexity_score: u8,
}

impl AIAnalysis {
    /// Substituted whenever the model call or its output is unusable.
    pub fn fallback() -> Self {
        Self {
            tldr_summary: "This scientific article presents new research findings in the field."
                .to_string(),
            eli5_summary: "Scientists discovered something new that could be important for understanding how things work.".to_string(),
            technical_summary: "This research presents novel findings with potential implications for the scientific community. Further analysis would be needed to determine the specific significance and methodology employed.".to_string(),
            suggested_tags: ["science", "research", "discovery", "study", "analysis"]
                .into_iter()
                .map(String::from)
                .collect(),
            complexity_score: 3,
        }
    }
}

/// Round a raw model score and clamp it into `[1, 5]`.
pub fn clamp_complexity(raw: f64) -> u8 {
    if raw.is_nan() {
        return 3;
    }
    raw.round()
        .clamp(f64::from(MIN_COMPLEXITY), f64::from(MAX_COMPLEXITY)) as u8
}

/// Whether the analysis came from the model or is the static fallback.
/// Callers currently treat both the same; the distinction is kept so
/// that policy can change without losing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Generated(AIAnalysis),
    Defaulted { analysis: AIAnalysis, reason: String },
}

impl AnalysisOutcome {
    pub fn defaulted(reason: impl Into<String>) -> Self {
        Self::Defaulted {
            analysis: AIAnalysis::fallback(),
            reason: reason.into(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    pub fn analysis(&self) -> &AIAnalysis {
        match self {
            Self::Generated(analysis) | Self::Defaulted { analysis, .. } => analysis,
        }
    }

    pub fn into_analysis(self) -> AIAnalysis {
        match self {
            Self::Generated(analysis) | Self::Defaulted { analysis, .. } => analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_is_rounded_and_clamped() {
        assert_eq!(clamp_complexity(0.0), 1);
        assert_eq!(clamp_complexity(-4.0), 1);
        assert_eq!(clamp_complexity(7.0), 5);
        assert_eq!(clamp_complexity(3.6), 4);
        assert_eq!(clamp_complexity(3.4), 3);
        assert_eq!(clamp_complexity(2.5), 3);
        assert_eq!(clamp_complexity(1e300), 5);
    }

    #[test]
    fn fallback_has_fixed_tags_and_middle_complexity() {
        let fallback = AIAnalysis::fallback();
        assert_eq!(
            fallback.suggested_tags,
            vec!["science", "research", "discovery", "study", "analysis"]
        );
        assert_eq!(fallback.complexity_score, 3);
    }

    #[test]
    fn defaulted_outcome_carries_fallback() {
        let outcome = AnalysisOutcome::defaulted("model unavailable");
        assert!(!outcome.is_generated());
        assert_eq!(outcome.into_analysis(), AIAnalysis::fallback());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(AIAnalysis::fallback()).unwrap();
        assert_eq!(json["complexityScore"], 3);
        assert!(json["tldrSummary"].is_string());
        assert!(json["eli5Summary"].is_string());
        assert!(json["technicalSummary"].is_string());
        assert_eq!(json["suggestedTags"][0], "science");
    }
}
