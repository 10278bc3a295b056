//! Per-job ranking orchestration: resolve resume text, decide cache-hit vs
//! recompute, score semantically with lexical fallback, persist the cache
//! entry, and return a stably sorted ranked list.
//!
//! Failure policy: everything that can go wrong for ONE applicant (extraction,
//! scoring, cache writes, even a panic in the scoring task) is contained to
//! that applicant. The request as a whole fails only when the job itself
//! cannot be loaded.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::extract::ResumeExtractor;
use crate::models::{Application, User};
use crate::ranking::cache::RankingCache;
use crate::ranking::lexical::{jd_match_score, resume_quality_score};
use crate::ranking::semantic::{to_range, SemanticScorer};
use crate::ranking::text::{hash_text, token_set, unique_tokens};
use crate::ranking::Provider;
use crate::store::{ApplicationStore, JobStore, UserStore};

/// Matched/missing keyword lists on the fallback path are capped here.
pub const KEYWORD_LIST_CAP: usize = 30;

const JD_WEIGHT: f64 = 0.7;
const QUALITY_WEIGHT: f64 = 0.3;

// ── response types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub jd_match_score: u32,
    pub resume_quality_score: u32,
    pub final_score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplicant {
    pub application_id: String,
    pub applicant: ApplicantRef,
    pub resume_url: String,
    pub scores: Scores,
    pub provider: Provider,
    pub provider_error: String,
    pub matched_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplicantsResponse {
    pub success: bool,
    pub job: JobRef,
    pub ranked_applicants: Vec<RankedApplicant>,
}

struct ScoringOutcome {
    provider: Provider,
    provider_error: String,
    jd_match: u32,
    quality: u32,
    matched_keywords: Vec<String>,
    missing_skills: Vec<String>,
}

// ── engine ──────────────────────────────────────────────────────────────────

/// The ranking coordinator. Cheap to clone; every dependency sits behind an
/// `Arc` seam so tests can substitute in-memory fakes.
#[derive(Clone)]
pub struct RankingEngine {
    jobs: Arc<dyn JobStore>,
    users: Arc<dyn UserStore>,
    applications: Arc<dyn ApplicationStore>,
    extractor: Arc<dyn ResumeExtractor>,
    scorer: Arc<dyn SemanticScorer>,
    concurrency: usize,
    extraction_timeout: Duration,
}

impl RankingEngine {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        users: Arc<dyn UserStore>,
        applications: Arc<dyn ApplicationStore>,
        extractor: Arc<dyn ResumeExtractor>,
        scorer: Arc<dyn SemanticScorer>,
        concurrency: usize,
        extraction_timeout: Duration,
    ) -> Self {
        Self {
            jobs,
            users,
            applications,
            extractor,
            scorer,
            concurrency: concurrency.max(1),
            extraction_timeout,
        }
    }

    /// Ranks every application for a job, descending by final score. Ties keep
    /// application-list order (the sort is stable and results are reassembled
    /// in input order first).
    pub async fn ranked_applicants(
        &self,
        job_id: &str,
    ) -> Result<RankedApplicantsResponse, AppError> {
        let job = self
            .jobs
            .get_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        let applications = self.applications.list_for_job(job_id).await?;
        let total = applications.len();
        let jd_text: Arc<String> = Arc::new(job.description.clone());
        let jd_hash: Arc<String> = Arc::new(hash_text(&jd_text));

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(usize, Option<RankedApplicant>)> = JoinSet::new();

        for (index, application) in applications.into_iter().enumerate() {
            let engine = self.clone();
            let semaphore = semaphore.clone();
            let jd_text = jd_text.clone();
            let jd_hash = jd_hash.clone();
            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, None);
                };
                let result = engine.score_application(&jd_text, &jd_hash, application).await;
                (index, result)
            });
        }

        // Reassemble in input order so the stable sort below has a
        // deterministic tie order regardless of task completion order.
        let mut slots: Vec<Option<RankedApplicant>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = result,
                Err(e) => error!("ranking task failed: {e}"),
            }
        }

        let mut ranked: Vec<RankedApplicant> = slots.into_iter().flatten().collect();
        ranked.sort_by(|a, b| b.scores.final_score.cmp(&a.scores.final_score));

        info!(
            job_id,
            applicants = ranked.len(),
            "ranked applicants computed"
        );

        Ok(RankedApplicantsResponse {
            success: true,
            job: JobRef {
                id: job.id,
                title: job.title,
            },
            ranked_applicants: ranked,
        })
    }

    /// Scores one application. Returns `None` only when the applicant's user
    /// record is unavailable; every other failure degrades to a computable
    /// result.
    async fn score_application(
        &self,
        jd_text: &str,
        jd_hash: &str,
        application: Application,
    ) -> Option<RankedApplicant> {
        let user = match self.users.get_user(application.user_id()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(application_id = %application.id, "skipping application: user record missing");
                return None;
            }
            Err(e) => {
                warn!(application_id = %application.id, error = %e, "skipping application: user lookup failed");
                return None;
            }
        };

        let resume_text = self.resolve_resume_text(&application, &user).await;
        let resume_hash = hash_text(&resume_text);

        if let Some(cache) = application
            .ranking_cache
            .as_ref()
            .filter(|c| c.is_valid(jd_hash, &resume_hash))
        {
            return Some(RankedApplicant {
                application_id: application.id.to_string(),
                applicant: ApplicantRef {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                },
                resume_url: user.resume_url,
                scores: Scores {
                    jd_match_score: cache.jd_match_score,
                    resume_quality_score: cache.resume_quality_score,
                    final_score: cache.final_score,
                },
                provider: Provider::Cache,
                provider_error: String::new(),
                matched_keywords: cache.matched_keywords.clone(),
                missing_skills: cache.missing_skills.clone(),
            });
        }

        let outcome = self.compute_scores(jd_text, &resume_text, &application).await;
        let final_score = (JD_WEIGHT * f64::from(outcome.jd_match)
            + QUALITY_WEIGHT * f64::from(outcome.quality))
        .round() as u32;

        let cache = RankingCache {
            jd_hash: jd_hash.to_string(),
            resume_hash,
            provider: outcome.provider,
            jd_match_score: outcome.jd_match,
            resume_quality_score: outcome.quality,
            final_score,
            matched_keywords: outcome.matched_keywords.clone(),
            missing_skills: outcome.missing_skills.clone(),
            computed_at: Utc::now(),
        };
        if let Err(e) = self.applications.set_ranking_cache(&application.id, &cache).await {
            // Best-effort: the computed result is still returned.
            warn!(application_id = %application.id, error = %e, "failed to persist ranking cache");
        }

        Some(RankedApplicant {
            application_id: application.id.to_string(),
            applicant: ApplicantRef {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            resume_url: user.resume_url,
            scores: Scores {
                jd_match_score: outcome.jd_match,
                resume_quality_score: outcome.quality,
                final_score,
            },
            provider: outcome.provider,
            provider_error: outcome.provider_error,
            matched_keywords: outcome.matched_keywords,
            missing_skills: outcome.missing_skills,
        })
    }

    async fn compute_scores(
        &self,
        jd_text: &str,
        resume_text: &str,
        application: &Application,
    ) -> ScoringOutcome {
        match self.scorer.analyze_resume(jd_text, resume_text).await {
            Ok(analysis) => ScoringOutcome {
                provider: Provider::Gemini,
                provider_error: String::new(),
                jd_match: to_range(analysis.jd_match_score, 0, 100),
                quality: to_range(analysis.resume_quality_score, 0, 100),
                matched_keywords: analysis.matched_keywords,
                missing_skills: analysis.missing_skills,
            },
            Err(e) => {
                warn!(
                    application_id = %application.id,
                    error = %e,
                    "semantic scoring failed, falling back to lexical scorer"
                );
                let resume_tokens = token_set(resume_text);
                let jd_token_order = unique_tokens(jd_text);
                let matched_keywords: Vec<String> = jd_token_order
                    .iter()
                    .filter(|t| resume_tokens.contains(*t))
                    .take(KEYWORD_LIST_CAP)
                    .cloned()
                    .collect();
                let missing_skills: Vec<String> = jd_token_order
                    .iter()
                    .filter(|t| !resume_tokens.contains(*t))
                    .take(KEYWORD_LIST_CAP)
                    .cloned()
                    .collect();
                ScoringOutcome {
                    provider: Provider::Fallback,
                    provider_error: e.to_string(),
                    jd_match: jd_match_score(jd_text, resume_text, &[]),
                    quality: resume_quality_score(resume_text, &[]),
                    matched_keywords,
                    missing_skills,
                }
            }
        }
    }

    /// Resolves the text to score: the backfilled `resume_text` when present,
    /// otherwise a fresh extraction from the applicant's resume URL, written
    /// back for future requests. Extraction failure or timeout yields empty
    /// text, never an error.
    pub async fn resolve_resume_text(&self, application: &Application, user: &User) -> String {
        if !application.resume_text.is_empty() {
            return application.resume_text.clone();
        }
        if user.resume_url.is_empty() {
            return String::new();
        }

        let extracted = match tokio::time::timeout(
            self.extraction_timeout,
            self.extractor.extract_text(&user.resume_url),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(user_id = %user.id, error = %e, "resume extraction failed, ranking with empty text");
                return String::new();
            }
            Err(_) => {
                warn!(
                    user_id = %user.id,
                    timeout_secs = self.extraction_timeout.as_secs(),
                    "resume extraction timed out, ranking with empty text"
                );
                return String::new();
            }
        };

        if let Err(e) = self
            .applications
            .set_resume_text(&application.id, &extracted)
            .await
        {
            warn!(application_id = %application.id, error = %e, "failed to backfill resume text");
        }
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::extract::ExtractError;
    use crate::models::{ApplicationId, ApplicationStatus, Job};
    use crate::ranking::semantic::{ResumeAnalysis, SemanticError};
    use crate::store::StoreError;

    // ── fakes ───────────────────────────────────────────────────────────────

    struct FakeJobs {
        job: Option<Job>,
    }

    #[async_trait]
    impl JobStore for FakeJobs {
        async fn get_job(&self, job_id: &str) -> Result<Option<Job>, StoreError> {
            Ok(self.job.clone().filter(|j| j.id == job_id))
        }
    }

    struct FakeUsers {
        users: HashMap<String, User>,
    }

    #[async_trait]
    impl UserStore for FakeUsers {
        async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
            Ok(self.users.get(user_id).cloned())
        }
    }

    #[derive(Default)]
    struct FakeApplications {
        apps: Mutex<Vec<Application>>,
        fail_cache_writes: bool,
        cache_writes: AtomicUsize,
    }

    #[async_trait]
    impl ApplicationStore for FakeApplications {
        async fn list_for_job(&self, job_id: &str) -> Result<Vec<Application>, StoreError> {
            Ok(self
                .apps
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.job_id() == job_id)
                .cloned()
                .collect())
        }

        async fn get(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
            Ok(self
                .apps
                .lock()
                .unwrap()
                .iter()
                .find(|a| &a.id == id)
                .cloned())
        }

        async fn set_resume_text(
            &self,
            id: &ApplicationId,
            resume_text: &str,
        ) -> Result<(), StoreError> {
            let mut apps = self.apps.lock().unwrap();
            if let Some(app) = apps.iter_mut().find(|a| &a.id == id) {
                app.resume_text = resume_text.to_string();
            }
            Ok(())
        }

        async fn set_ranking_cache(
            &self,
            id: &ApplicationId,
            cache: &RankingCache,
        ) -> Result<(), StoreError> {
            self.cache_writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_cache_writes {
                return Err(StoreError::Request("write throttled".to_string()));
            }
            let mut apps = self.apps.lock().unwrap();
            if let Some(app) = apps.iter_mut().find(|a| &a.id == id) {
                app.ranking_cache = Some(cache.clone());
            }
            Ok(())
        }
    }

    struct FakeExtractor {
        text: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ResumeExtractor for FakeExtractor {
        async fn extract_text(&self, _url: &str) -> Result<String, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.text {
                Some(text) => Ok(text.clone()),
                None => Err(ExtractError::Fetch { status: 403 }),
            }
        }
    }

    struct FakeScorer {
        analysis: Option<ResumeAnalysis>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SemanticScorer for FakeScorer {
        async fn analyze_resume(
            &self,
            _jd_text: &str,
            _resume_text: &str,
        ) -> Result<ResumeAnalysis, SemanticError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.analysis {
                Some(analysis) => Ok(analysis.clone()),
                None => Err(SemanticError::Unavailable),
            }
        }
    }

    // ── fixtures ────────────────────────────────────────────────────────────

    const JD: &str = "node.js backend engineer 5 years experience building services";

    fn job() -> Job {
        Job {
            id: "job-1".to_string(),
            company_id: "company-1".to_string(),
            title: "Backend Engineer".to_string(),
            description: JD.to_string(),
            location: "Remote".to_string(),
            category: "Engineering".to_string(),
            level: "Senior".to_string(),
            salary: 150_000,
            visible: true,
            posted_at: 1_714_000_000_000,
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            resume_url: format!("https://cdn.example.com/{id}.pdf"),
            image: None,
        }
    }

    fn application(user_id: &str, resume_text: &str) -> Application {
        Application {
            id: ApplicationId::new("job-1", user_id, 1_714_000_000_000),
            company_id: "company-1".to_string(),
            status: ApplicationStatus::Pending,
            resume_text: resume_text.to_string(),
            ranking_cache: None,
        }
    }

    fn analysis(jd: f64, quality: f64) -> ResumeAnalysis {
        ResumeAnalysis {
            jd_match_score: jd,
            resume_quality_score: quality,
            matched_keywords: vec!["node.js".to_string(), "backend".to_string()],
            missing_skills: vec!["kubernetes".to_string()],
            ..ResumeAnalysis::default()
        }
    }

    struct Harness {
        engine: RankingEngine,
        applications: Arc<FakeApplications>,
        scorer: Arc<FakeScorer>,
        extractor: Arc<FakeExtractor>,
    }

    fn harness(
        job: Option<Job>,
        users: Vec<User>,
        apps: Vec<Application>,
        scorer_analysis: Option<ResumeAnalysis>,
        extractor_text: Option<String>,
        fail_cache_writes: bool,
    ) -> Harness {
        let applications = Arc::new(FakeApplications {
            apps: Mutex::new(apps),
            fail_cache_writes,
            cache_writes: AtomicUsize::new(0),
        });
        let scorer = Arc::new(FakeScorer {
            analysis: scorer_analysis,
            calls: AtomicUsize::new(0),
        });
        let extractor = Arc::new(FakeExtractor {
            text: extractor_text,
            calls: AtomicUsize::new(0),
        });
        let engine = RankingEngine::new(
            Arc::new(FakeJobs { job }),
            Arc::new(FakeUsers {
                users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            }),
            applications.clone(),
            extractor.clone(),
            scorer.clone(),
            4,
            Duration::from_secs(5),
        );
        Harness {
            engine,
            applications,
            scorer,
            extractor,
        }
    }

    // ── tests ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_missing_job_is_not_found() {
        let h = harness(None, vec![], vec![], Some(analysis(80.0, 60.0)), None, false);
        let err = h.engine.ranked_applicants("job-1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_semantic_path_scores_and_caches() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "node.js backend engineer, 5 years experience")],
            Some(analysis(80.0, 60.0)),
            None,
            false,
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        assert!(response.success);
        assert_eq!(response.job.id, "job-1");
        assert_eq!(response.ranked_applicants.len(), 1);

        let ranked = &response.ranked_applicants[0];
        assert_eq!(ranked.provider, Provider::Gemini);
        assert_eq!(ranked.scores.jd_match_score, 80);
        assert_eq!(ranked.scores.resume_quality_score, 60);
        // 0.7 * 80 + 0.3 * 60 = 74
        assert_eq!(ranked.scores.final_score, 74);
        assert!(ranked.provider_error.is_empty());

        let stored = h.applications.apps.lock().unwrap()[0]
            .ranking_cache
            .clone()
            .unwrap();
        assert_eq!(stored.final_score, 74);
        assert_eq!(stored.provider, Provider::Gemini);
    }

    #[tokio::test]
    async fn test_second_call_serves_from_cache() {
        let h = harness(
            Some(job()),
            vec![user("alice"), user("bob")],
            vec![
                application("alice", "node.js backend engineer, 5 years experience"),
                application("bob", "java developer"),
            ],
            Some(analysis(80.0, 60.0)),
            None,
            false,
        );

        let first = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 2);

        let second = h.engine.ranked_applicants("job-1").await.unwrap();
        // No recomputation: scorer untouched, every result served from cache.
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 2);
        assert!(second
            .ranked_applicants
            .iter()
            .all(|r| r.provider == Provider::Cache));

        let first_scores: Vec<u32> = first
            .ranked_applicants
            .iter()
            .map(|r| r.scores.final_score)
            .collect();
        let second_scores: Vec<u32> = second
            .ranked_applicants
            .iter()
            .map(|r| r.scores.final_score)
            .collect();
        assert_eq!(first_scores, second_scores);
    }

    #[tokio::test]
    async fn test_changed_job_description_forces_recompute() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "node.js backend engineer")],
            Some(analysis(80.0, 60.0)),
            None,
            false,
        );
        h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 1);

        // Same engine, but the stored cache was computed against the old JD
        // hash; poke the stored hash to simulate a description edit.
        {
            let mut apps = h.applications.apps.lock().unwrap();
            let cache = apps[0].ranking_cache.as_mut().unwrap();
            cache.jd_hash = "0".repeat(64);
        }
        h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_final_score_cache_is_not_trusted() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "node.js backend engineer")],
            Some(analysis(0.0, 0.0)),
            None,
            false,
        );
        // First pass computes final_score 0 and stores it.
        let first = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(first.ranked_applicants[0].scores.final_score, 0);
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 1);

        // Hashes all match, but a zero score always recomputes.
        let second = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.ranked_applicants[0].provider, Provider::Gemini);
    }

    #[tokio::test]
    async fn test_fallback_on_scorer_failure() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application(
                "alice",
                "Backend engineer with 5 years experience in Node.js and Express",
            )],
            None, // scorer always fails
            None,
            false,
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        let ranked = &response.ranked_applicants[0];

        assert_eq!(ranked.provider, Provider::Fallback);
        assert!(!ranked.provider_error.is_empty());
        assert!(ranked.scores.final_score <= 100);
        assert!(ranked.scores.jd_match_score > 0);

        assert!(ranked.matched_keywords.len() <= KEYWORD_LIST_CAP);
        assert!(ranked.missing_skills.len() <= KEYWORD_LIST_CAP);
        // A token never shows up on both sides.
        assert!(ranked
            .matched_keywords
            .iter()
            .all(|t| !ranked.missing_skills.contains(t)));
    }

    #[tokio::test]
    async fn test_failed_extraction_still_ranks_applicant() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "")], // no backfilled text, extractor fails
            None,
            None,
            false,
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(response.ranked_applicants.len(), 1);
        assert_eq!(h.extractor.calls.load(Ordering::SeqCst), 1);

        let ranked = &response.ranked_applicants[0];
        // Empty resume on the fallback path: everything in the JD is missing.
        assert_eq!(ranked.scores.jd_match_score, 0);
        assert!(ranked.matched_keywords.is_empty());
        assert!(!ranked.missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_extracted_text_is_backfilled() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "")],
            Some(analysis(50.0, 50.0)),
            Some("extracted resume body".to_string()),
            false,
        );
        h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(
            h.applications.apps.lock().unwrap()[0].resume_text,
            "extracted resume body"
        );

        // Second request reuses the backfill instead of extracting again.
        h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(h.extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_user_is_skipped_not_fatal() {
        let h = harness(
            Some(job()),
            vec![user("alice")], // bob has no user record
            vec![
                application("alice", "node.js backend engineer"),
                application("bob", "java developer"),
            ],
            Some(analysis(70.0, 40.0)),
            None,
            false,
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(response.ranked_applicants.len(), 1);
        assert_eq!(response.ranked_applicants[0].applicant.id, "alice");
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_request() {
        let h = harness(
            Some(job()),
            vec![user("alice")],
            vec![application("alice", "node.js backend engineer")],
            Some(analysis(80.0, 60.0)),
            None,
            true, // cache writes fail
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        assert_eq!(response.ranked_applicants[0].scores.final_score, 74);
        assert_eq!(h.applications.cache_writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_results_sorted_descending_with_stable_ties() {
        // Distinct scores per applicant come from the fallback path: bob's
        // resume matches the JD, carol's is unrelated, dave ties with carol.
        let h = harness(
            Some(job()),
            vec![user("bob"), user("carol"), user("dave")],
            vec![
                application("carol", "gardener"),
                application("bob", "node.js backend engineer 5 years experience building services"),
                application("dave", "gardener"),
            ],
            None,
            None,
            false,
        );
        let response = h.engine.ranked_applicants("job-1").await.unwrap();
        let scores: Vec<u32> = response
            .ranked_applicants
            .iter()
            .map(|r| r.scores.final_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(response.ranked_applicants[0].applicant.id, "bob");
        // carol and dave tie; carol applied first and stays first.
        assert_eq!(response.ranked_applicants[1].applicant.id, "carol");
        assert_eq!(response.ranked_applicants[2].applicant.id, "dave");
    }
}
