//! Prompt construction for the semantic resume analysis call.

use crate::llm_client::{truncate, PROMPT_INPUT_LIMIT};

/// Fixed instruction block for ATS-style JD/resume analysis. The response
/// schema must stay in lockstep with `ResumeAnalysis`.
const RESUME_ANALYSIS_TEMPLATE: &str = "\
Act as a professional ATS scorer for recruiters. Perform SEMANTIC analysis between the Job Description (JD) and the Resume.

Requirements:
- Ignore stopwords/filler words entirely (e.g., a, an, the, for, of, to, in, on, is, are, etc.).
- Consider synonyms, related skills, frameworks, libraries (e.g., Node \u{2248} Node.js, React \u{2248} ReactJS).
- Weight domain-relevant experience and seniority (years, role level) higher than generic text.
- Penalize fluff and keyword stuffing that is unrelated to the JD.
- Extract real skills/entities; do not include stopwords as skills.
- Estimate years of experience from resume content.

Scoring:
- jdMatchScore (0-100): semantic relevance of resume to JD, considering synonyms and context.
- resumeQualityScore (0-100): quality based on clarity, structure, quantified impact, years, certifications, breadth/depth of skills.

Output JSON ONLY with keys:
{
  \"jdMatchScore\": number,
  \"resumeQualityScore\": number,
  \"matchedKeywords\": string[],
  \"missingSkills\": string[],
  \"extractedSkills\": string[],
  \"estimatedYearsExperience\": number,
  \"certificationsCount\": number
}";

/// Builds the full analysis prompt, truncating both inputs so a pathological
/// upload cannot blow the context window.
pub fn resume_analysis_prompt(jd_text: &str, resume_text: &str) -> String {
    format!(
        "{}\n\nJD:\n{}\n\nResume:\n{}\n\nJSON:",
        RESUME_ANALYSIS_TEMPLATE,
        truncate(jd_text, PROMPT_INPUT_LIMIT),
        truncate(resume_text, PROMPT_INPUT_LIMIT),
    )
}
