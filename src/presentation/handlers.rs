use crate::application::auth_service::AuthService;
use crate::application::interview_service::InterviewService;
use crate::application::job_service::JobService;
use crate::application::shortlist_service::ShortlistService;
use crate::data::interview_repository::InMemoryInterviewRepository;
use crate::data::job_repository::InMemoryJobRepository;
use crate::data::shortlist_repository::InMemoryShortlistRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::ai::AiClient;
use crate::domain::error::DomainError;
use crate::presentation::middleware::{AuthenticatedUser, RejectedToken};
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::future::{Ready, ready};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Request bodies above this size are rejected.
pub const JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age_hours: u64,
}

// AppState holding the services
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub job_service: JobService<InMemoryJobRepository, InMemoryUserRepository>,
    pub interview_service: InterviewService<InMemoryInterviewRepository, InMemoryJobRepository>,
    pub shortlist_service: ShortlistService<InMemoryShortlistRepository>,
    pub cookies: CookieSettings,
}

impl AppState {
    /// Wires every service to fresh in-memory stores sharing one AI client.
    pub fn in_memory(
        ai: Arc<dyn AiClient>,
        jwt_secret: String,
        token_ttl_secs: u64,
        cookies: CookieSettings,
    ) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let jobs = Arc::new(InMemoryJobRepository::new());
        let interviews = Arc::new(InMemoryInterviewRepository::new());
        let shortlists = Arc::new(InMemoryShortlistRepository::new());

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), jwt_secret, token_ttl_secs)),
            job_service: JobService::new(jobs.clone(), users, ai.clone()),
            interview_service: InterviewService::new(interviews, jobs, ai),
            shortlist_service: ShortlistService::new(shortlists),
            cookies,
        }
    }
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::Upstream(msg)
            | ApiError::Database(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        if status.is_server_error() {
            error!(error = %error_msg, status = %status, "Request failed");
        } else {
            warn!(error = %error_msg, status = %status, "Request rejected");
        }

        // Storage internals stay in the logs.
        let message = match self {
            ApiError::Database(_) => "A storage error occurred",
            other => other.message(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: message.to_string(),
            details: serde_json::json!({ "message": message }),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Forbidden(msg)) => ApiError::Forbidden(msg.clone()),
            Some(DomainError::Conflict(msg)) => ApiError::Conflict(msg.clone()),
            Some(DomainError::Ai(msg)) => ApiError::Upstream(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Database(err.to_string()),
        }
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let extensions = req.extensions();
        let result = match extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(user.clone()),
            None if extensions.get::<RejectedToken>().is_some() => {
                Err(ApiError::Unauthorized("Token is not valid".to_string()))
            }
            None => Err(ApiError::Unauthorized("No token provided".to_string())),
        };
        ready(result)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
