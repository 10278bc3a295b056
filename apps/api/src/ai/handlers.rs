use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{candidate_summary_prompt, email_template_prompt};
use crate::ai::{CandidateBrief, EmailTemplate};
use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::ApplicationId;
use crate::ranking::orchestrator::JobRef;
use crate::ranking::semantic::to_range;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRef {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummaryResponse {
    pub success: bool,
    pub candidate: CandidateRef,
    pub job: JobRef,
    pub summary: String,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub fit_score: u32,
    pub recommended_interview_questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateRequest {
    pub template_type: Option<String>,
    pub candidate_name: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateResponse {
    pub success: bool,
    pub template: EmailTemplate,
}

fn require_llm(state: &AppState) -> Result<&GeminiClient, AppError> {
    state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::LlmUnavailable("GEMINI_API_KEY not set".to_string()))
}

fn map_llm_error(e: LlmError) -> AppError {
    match e {
        LlmError::Parse(_) | LlmError::EmptyContent => {
            AppError::BadGateway("AI response parsing failed".to_string())
        }
        other => AppError::Internal(other.into()),
    }
}

/// GET /api/recruiter/application/:application_id/summary
pub async fn handle_candidate_summary(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
) -> Result<Json<CandidateSummaryResponse>, AppError> {
    let id: ApplicationId = application_id
        .parse()
        .map_err(|_| AppError::NotFound("Application not found".to_string()))?;
    let application = state
        .applications
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let job = state.jobs.get_job(application.job_id()).await?;
    let user = state.users.get_user(application.user_id()).await?;

    let jd_text = job
        .as_ref()
        .map(|j| j.description.clone())
        .unwrap_or_default();
    let resume_text = match &user {
        Some(user) => state.engine.resolve_resume_text(&application, user).await,
        None => application.resume_text.clone(),
    };

    let llm = require_llm(&state)?;
    let prompt = candidate_summary_prompt(&jd_text, &resume_text);
    let brief: CandidateBrief = llm.call_json(&prompt).await.map_err(map_llm_error)?;

    Ok(Json(CandidateSummaryResponse {
        success: true,
        candidate: CandidateRef {
            name: user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
            email: user.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
        },
        job: JobRef {
            id: job.as_ref().map(|j| j.id.clone()).unwrap_or_default(),
            title: job.as_ref().map(|j| j.title.clone()).unwrap_or_default(),
        },
        summary: brief.summary,
        strengths: brief.strengths,
        risks: brief.risks,
        fit_score: to_range(brief.fit_score, 0, 100),
        recommended_interview_questions: brief.recommended_interview_questions,
    }))
}

/// POST /api/recruiter/emailTemplate
pub async fn handle_email_template(
    State(state): State<AppState>,
    Json(request): Json<EmailTemplateRequest>,
) -> Result<Json<EmailTemplateResponse>, AppError> {
    let llm = require_llm(&state)?;

    let template_type = request
        .template_type
        .as_deref()
        .unwrap_or("outreach")
        .to_lowercase();
    let tone = request.tone.as_deref().unwrap_or("professional, friendly");
    let company = request.company_name.as_deref().unwrap_or("Our Company");
    let candidate = request.candidate_name.as_deref().unwrap_or("Candidate");
    let role = request.job_title.as_deref().unwrap_or("the role");

    let prompt = email_template_prompt(&template_type, tone, company, candidate, role);
    let template: EmailTemplate = llm.call_json(&prompt).await.map_err(map_llm_error)?;

    Ok(Json(EmailTemplateResponse {
        success: true,
        template,
    }))
}
