//! Semantic scoring via the generative model. Defines the strict-JSON
//! response schema and the `SemanticScorer` seam; the fallback decision on
//! failure belongs to the orchestrator, not to this module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{GeminiClient, LlmError};
use crate::ranking::prompts::resume_analysis_prompt;

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("GEMINI_API_KEY not set")]
    Unavailable,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Model output for one JD/resume pair. Every field defaults when absent:
/// the model reply is untrusted and partial JSON must not fail the parse.
/// Numeric scores are raw here; callers clamp them via `to_range` before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub jd_match_score: f64,
    #[serde(default)]
    pub resume_quality_score: f64,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub estimated_years_experience: f64,
    #[serde(default)]
    pub certifications_count: f64,
}

/// Semantically-aware JD/resume scoring. Implementations must fail loudly
/// (never return silent zeros) so the orchestrator can fall back.
#[async_trait]
pub trait SemanticScorer: Send + Sync {
    async fn analyze_resume(
        &self,
        jd_text: &str,
        resume_text: &str,
    ) -> Result<ResumeAnalysis, SemanticError>;
}

/// Gemini-backed scorer. Holds `None` when no credential is configured, in
/// which case every call fails with `SemanticError::Unavailable`.
pub struct GeminiScorer {
    llm: Option<GeminiClient>,
}

impl GeminiScorer {
    pub fn new(llm: Option<GeminiClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SemanticScorer for GeminiScorer {
    async fn analyze_resume(
        &self,
        jd_text: &str,
        resume_text: &str,
    ) -> Result<ResumeAnalysis, SemanticError> {
        let llm = self.llm.as_ref().ok_or(SemanticError::Unavailable)?;
        let prompt = resume_analysis_prompt(jd_text, resume_text);
        let analysis = llm.call_json::<ResumeAnalysis>(&prompt).await?;
        Ok(analysis)
    }
}

/// Clamps an untrusted numeric model output into `[min, max]`, rounding to an
/// integer. NaN maps to `min`.
pub fn to_range(value: f64, min: u32, max: u32) -> u32 {
    if value.is_nan() {
        return min;
    }
    let rounded = value.round();
    if rounded <= f64::from(min) {
        min
    } else if rounded >= f64::from(max) {
        max
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_deserializes_full_payload() {
        let raw = r#"{
            "jdMatchScore": 82,
            "resumeQualityScore": 74.5,
            "matchedKeywords": ["rust", "tokio"],
            "missingSkills": ["kubernetes"],
            "extractedSkills": ["rust", "tokio", "axum"],
            "estimatedYearsExperience": 6,
            "certificationsCount": 1
        }"#;
        let analysis: ResumeAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(analysis.jd_match_score, 82.0);
        assert_eq!(analysis.matched_keywords, vec!["rust", "tokio"]);
        assert_eq!(analysis.missing_skills, vec!["kubernetes"]);
    }

    #[test]
    fn test_analysis_missing_fields_default() {
        let analysis: ResumeAnalysis = serde_json::from_str(r#"{"jdMatchScore": 40}"#).unwrap();
        assert_eq!(analysis.jd_match_score, 40.0);
        assert_eq!(analysis.resume_quality_score, 0.0);
        assert!(analysis.matched_keywords.is_empty());
    }

    #[test]
    fn test_to_range_clamps_and_rounds() {
        assert_eq!(to_range(82.4, 0, 100), 82);
        assert_eq!(to_range(82.6, 0, 100), 83);
        assert_eq!(to_range(-5.0, 0, 100), 0);
        assert_eq!(to_range(250.0, 0, 100), 100);
    }

    #[test]
    fn test_to_range_nan_maps_to_min() {
        assert_eq!(to_range(f64::NAN, 0, 100), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_scorer_fails_with_unavailable() {
        let scorer = GeminiScorer::new(None);
        let err = scorer.analyze_resume("jd", "resume").await.unwrap_err();
        assert!(matches!(err, SemanticError::Unavailable));
        assert!(!err.to_string().is_empty());
    }
}
