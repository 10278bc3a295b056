pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai_handlers;
use crate::ranking::handlers as ranking_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recruiter API; camelCase path segments are part of the client contract.
        .route(
            "/api/recruiter/:job_id/rankedApplicants",
            get(ranking_handlers::handle_ranked_applicants),
        )
        // Alias without "/summary" kept for existing clients.
        .route(
            "/api/recruiter/application/:application_id",
            get(ai_handlers::handle_candidate_summary),
        )
        .route(
            "/api/recruiter/application/:application_id/summary",
            get(ai_handlers::handle_candidate_summary),
        )
        .route(
            "/api/recruiter/emailTemplate",
            post(ai_handlers::handle_email_template),
        )
        .with_state(state)
}
