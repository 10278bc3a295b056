//! Recruiter-assist features sharing the ranking stack's LLM client: the
//! per-application candidate brief and generated outreach/rejection/offer
//! emails.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Model output for the candidate brief. Fields default on absence; the raw
/// fit score is clamped by the handler before it reaches the response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateBrief {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub fit_score: f64,
    #[serde(default)]
    pub recommended_interview_questions: Vec<String>,
}

/// Model output for a generated recruiter email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}
