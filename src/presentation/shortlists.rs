use crate::domain::shortlist::{Shortlist, ShortlistCriteria};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Serialize)]
pub struct ShortlistResponse {
    pub message: String,
    pub shortlist: Shortlist,
}

/// Body is optional; an absent or unreadable body means default criteria.
#[instrument(skip(state, user, criteria), fields(job_id = %*path, user_id = %user.user_id))]
pub async fn create_shortlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    criteria: Option<web::Json<ShortlistCriteria>>,
) -> Result<HttpResponse, ApiError> {
    let job = state
        .job_service
        .owned_job(&path, &user.user_id, user.role)
        .await?;
    let criteria = criteria.map(web::Json::into_inner).unwrap_or_default();

    let ranked = state.interview_service.completed_for_job(&job.id).await?;
    let shortlist = state
        .shortlist_service
        .create(&job.id, &user.user_id, &ranked, &criteria)
        .await?;

    info!(
        completed = ranked.len(),
        selected = shortlist.selected_candidates.len(),
        "Shortlisting complete"
    );
    Ok(HttpResponse::Ok().json(ShortlistResponse {
        message: "Shortlisting complete".to_string(),
        shortlist,
    }))
}

#[instrument(skip(state, user), fields(job_id = %*path, user_id = %user.user_id))]
pub async fn list_shortlists(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let job = state
        .job_service
        .owned_job(&path, &user.user_id, user.role)
        .await?;
    let shortlists = state.shortlist_service.list(&job.id).await?;
    Ok(HttpResponse::Ok().json(shortlists))
}
