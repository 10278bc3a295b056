use std::sync::Arc;

use crate::llm_client::GeminiClient;
use crate::ranking::orchestrator::RankingEngine;
use crate::store::{ApplicationStore, JobStore, UserStore};

/// Shared application state injected into all route handlers via Axum
/// extractors. Repositories sit behind trait objects so handlers and the
/// ranking engine can be exercised against in-memory fakes; the extractor is
/// owned by the engine, which also exposes resume-text resolution to the
/// summary endpoint.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub users: Arc<dyn UserStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub engine: Arc<RankingEngine>,
    /// `None` when `GEMINI_API_KEY` is not configured. The ranking path
    /// degrades to the lexical fallback; the summary/email endpoints reject.
    pub llm: Option<GeminiClient>,
}
