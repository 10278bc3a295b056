//! Deterministic lexical scoring — the fallback path when the semantic scorer
//! is unavailable, and the definition of the two component scores the ranking
//! engine combines.

use crate::ranking::text::{
    count_certifications, estimate_years_of_experience, jaccard_similarity, token_set,
};

/// Heuristic resume quality in 0..=100.
///
/// Weighted sum of three capped signals: years of experience (cap 20, worth
/// 40 points), overlap with the provided skill list (cap 15 matches, worth 40
/// points), certification mentions (cap 5, worth 20 points).
pub fn resume_quality_score(resume_text: &str, skills: &[String]) -> u32 {
    let tokens = token_set(resume_text);
    let years = estimate_years_of_experience(resume_text);
    let certs = count_certifications(resume_text);

    let skill_matches = skills
        .iter()
        .filter(|s| tokens.contains(&s.to_lowercase()))
        .count() as u32;

    let years_score = f64::from(years.min(20)) / 20.0 * 40.0;
    let skills_score = f64::from(skill_matches.min(15)) / 15.0 * 40.0;
    let certs_score = f64::from(certs.min(5)) / 5.0 * 20.0;

    (years_score + skills_score + certs_score).round() as u32
}

/// JD relevance in 0..=100: Jaccard similarity of the full texts plus a small
/// boost for extracted phrases that appear as JD tokens (cap 20 phrases, boost
/// at most 0.2), the sum capped at 1 before scaling.
pub fn jd_match_score(jd_text: &str, resume_text: &str, extracted_phrases: &[String]) -> u32 {
    let jaccard = jaccard_similarity(jd_text, resume_text);
    let jd_tokens = token_set(jd_text);

    let phrase_matches = extracted_phrases
        .iter()
        .filter(|p| jd_tokens.contains(&p.to_lowercase()))
        .count() as u32;

    let phrase_boost = f64::from(phrase_matches.min(20)) / 20.0 * 0.2;
    (f64::min(1.0, jaccard + phrase_boost) * 100.0).round() as u32
}
