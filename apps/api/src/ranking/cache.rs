//! Content-addressed ranking memo embedded on the Application record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::Provider;

/// Persisted result of one scoring pass, validated by content hashes of the
/// inputs that produced it. Created and overwritten only by the ranking
/// engine, never deleted: a stale entry is silently superseded when either
/// hash changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingCache {
    pub jd_hash: String,
    pub resume_hash: String,
    pub provider: Provider,
    pub jd_match_score: u32,
    pub resume_quality_score: u32,
    pub final_score: u32,
    pub matched_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

impl RankingCache {
    /// A cache entry is usable without recomputation iff both content hashes
    /// still match AND the final score is positive. A zero final score is
    /// indistinguishable from an uninitialized record, so it always forces a
    /// recompute; a legitimately scored-zero applicant is re-scored each
    /// request. Deliberate policy, kept as-is.
    pub fn is_valid(&self, current_jd_hash: &str, current_resume_hash: &str) -> bool {
        self.jd_hash == current_jd_hash
            && self.resume_hash == current_resume_hash
            && self.final_score > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::text::hash_text;

    fn entry(jd_hash: &str, resume_hash: &str, final_score: u32) -> RankingCache {
        RankingCache {
            jd_hash: jd_hash.to_string(),
            resume_hash: resume_hash.to_string(),
            provider: Provider::Gemini,
            jd_match_score: 60,
            resume_quality_score: 40,
            final_score,
            matched_keywords: vec!["rust".to_string()],
            missing_skills: vec![],
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_when_hashes_match_and_score_positive() {
        let jd = hash_text("jd");
        let resume = hash_text("resume");
        assert!(entry(&jd, &resume, 54).is_valid(&jd, &resume));
    }

    #[test]
    fn test_zero_final_score_is_never_valid() {
        let jd = hash_text("jd");
        let resume = hash_text("resume");
        assert!(!entry(&jd, &resume, 0).is_valid(&jd, &resume));
    }

    #[test]
    fn test_changed_jd_invalidates() {
        let jd = hash_text("jd v1");
        let resume = hash_text("resume");
        let cache = entry(&jd, &resume, 54);
        assert!(!cache.is_valid(&hash_text("jd v2"), &resume));
    }

    #[test]
    fn test_changed_resume_invalidates() {
        let jd = hash_text("jd");
        let resume = hash_text("resume v1");
        let cache = entry(&jd, &resume, 54);
        assert!(!cache.is_valid(&jd, &hash_text("resume v2")));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let jd = hash_text("jd");
        let resume = hash_text("resume");
        let json = serde_json::to_value(entry(&jd, &resume, 54)).unwrap();
        assert!(json.get("jdHash").is_some());
        assert!(json.get("finalScore").is_some());
        assert_eq!(json.get("provider").unwrap(), "gemini");
    }
}
