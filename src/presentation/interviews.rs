use crate::domain::interview::{InterviewFilter, StartInterview, SubmitAnswers};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub interview_id: String,
    pub questions: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInterviewResponse {
    pub message: String,
    pub interview_id: String,
    pub total_score: u32,
}

#[instrument(skip(state, req), fields(job_id = %req.job_id, interview_id))]
pub async fn start_interview(
    state: web::Data<AppState>,
    req: web::Json<StartInterview>,
) -> Result<HttpResponse, ApiError> {
    let interview = state
        .interview_service
        .start(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to start interview");
            ApiError::from(e)
        })?;
    tracing::Span::current().record("interview_id", interview.id.as_str());

    Ok(HttpResponse::Ok().json(StartInterviewResponse {
        interview_id: interview.id,
        questions: interview.questions.into_iter().map(|q| q.question).collect(),
    }))
}

#[instrument(skip(state, req), fields(interview_id = %*path))]
pub async fn submit_interview(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SubmitAnswers>,
) -> Result<HttpResponse, ApiError> {
    let interview_id = path.into_inner();
    let interview = state
        .interview_service
        .submit(&interview_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(interview_id = %interview_id, error = %e, "Failed to submit interview");
            ApiError::from(e)
        })?;

    info!(total_score = interview.total_score, "Interview submitted successfully");
    Ok(HttpResponse::Ok().json(SubmitInterviewResponse {
        message: "Interview submitted successfully".to_string(),
        interview_id: interview.id,
        total_score: interview.total_score,
    }))
}

#[instrument(skip(state), fields(interview_id = %*path))]
pub async fn interview_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let report = state.interview_service.report(&path).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[instrument(skip(state, user, filter), fields(user_id = %user.user_id))]
pub async fn list_interviews(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    filter: web::Query<InterviewFilter>,
) -> Result<HttpResponse, ApiError> {
    let reports = state
        .interview_service
        .list_for_recruiter(&user.user_id, user.role, &filter)
        .await?;
    info!(count = reports.len(), "Interviews listed");
    Ok(HttpResponse::Ok().json(reports))
}
