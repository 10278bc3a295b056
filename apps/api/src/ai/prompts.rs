//! Prompt construction for the recruiter-assist endpoints.

use crate::llm_client::{truncate, PROMPT_INPUT_LIMIT};

/// Builds the candidate-brief prompt. The key set must stay in lockstep with
/// `CandidateBrief`.
pub fn candidate_summary_prompt(jd_text: &str, resume_text: &str) -> String {
    format!(
        "Create a concise recruiter-friendly candidate brief based on the Job Description and Resume.\n\
         Return STRICT JSON with keys: summary (string), strengths (string[]), risks (string[]), \
         fitScore (0-100), recommendedInterviewQuestions (string[]).\n\n\
         JD: {}\n\nResume: {}\n\nJSON:",
        truncate(jd_text, PROMPT_INPUT_LIMIT),
        truncate(resume_text, PROMPT_INPUT_LIMIT),
    )
}

/// Builds the recruiter email prompt for one of the known template types.
pub fn email_template_prompt(
    template_type: &str,
    tone: &str,
    company_name: &str,
    candidate_name: &str,
    job_title: &str,
) -> String {
    format!(
        "Write an email template as JSON ONLY with keys: subject, body.\n\
         Type: {template_type} (one of outreach, rejection, offer)\n\
         Tone: {tone}\n\
         Company: {company_name}\n\
         Candidate: {candidate_name}\n\
         Role: {job_title}\n\
         Constraints: concise, personalized, clear CTA, no placeholders beyond given fields, no markdown fences."
    )
}
