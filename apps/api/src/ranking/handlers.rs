use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::ranking::orchestrator::RankedApplicantsResponse;
use crate::state::AppState;

/// GET /api/recruiter/:job_id/rankedApplicants
pub async fn handle_ranked_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<RankedApplicantsResponse>, AppError> {
    let response = state.engine.ranked_applicants(&job_id).await?;
    Ok(Json(response))
}
