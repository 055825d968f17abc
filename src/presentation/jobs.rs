use crate::domain::job::{Job, PostJobRequest};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct JobPostedResponse {
    pub message: String,
    pub job: Job,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
}

#[instrument(skip(state, user, req), fields(user_id = %user.user_id, job_id))]
pub async fn post_job(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<PostJobRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(title = %req.title, "Job post request received");
    let job = state
        .job_service
        .post_job(&user.user_id, user.role, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to post job");
            ApiError::from(e)
        })?;
    tracing::Span::current().record("job_id", job.id.as_str());

    Ok(HttpResponse::Created().json(JobPostedResponse {
        message: "Job posted".to_string(),
        job,
    }))
}

#[instrument(skip(state))]
pub async fn list_jobs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let jobs = state.job_service.list_jobs().await?;
    info!(count = jobs.len(), "Jobs listed");
    Ok(HttpResponse::Ok().json(jobs))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn my_jobs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let jobs = state.job_service.my_jobs(&user.user_id, user.role).await?;
    Ok(HttpResponse::Ok().json(JobListResponse { jobs }))
}

#[instrument(skip(state), fields(job_id = %*path))]
pub async fn view_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let job = state.job_service.get_job(&path).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[instrument(skip(state, user), fields(job_id = %*path, user_id = %user.user_id))]
pub async fn delete_job(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let job_id = path.into_inner();
    state
        .job_service
        .delete_job(&job_id, &user.user_id, user.role)
        .await
        .map_err(|e| {
            error!(job_id = %job_id, error = %e, "Failed to delete job");
            ApiError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job deleted")))
}

#[instrument(skip(state, user), fields(job_id = %*path, user_id = %user.user_id))]
pub async fn apply(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state
        .job_service
        .apply(&path, &user.user_id, user.role)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Applied successfully")))
}
