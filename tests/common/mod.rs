#![allow(dead_code)]

use actix_web::web;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use recruit_ai_api::domain::ai::AiClient;
use recruit_ai_api::presentation::handlers::{AppState, CookieSettings};
use std::sync::Arc;

pub const JWT_SECRET: &str = "test-secret-key-for-integration-tests";
pub const TOKEN_TTL_SECS: u64 = 3600;

pub const JOB_POSTING_REPLY: &str = r#"```json
{
  "title": "Backend Engineer",
  "description": "Build and run our hiring platform services.",
  "company": "Acme",
  "location": "Remote",
  "salaryRange": { "min": 900000, "max": 600000, "currency": "inr" },
  "skillsRequired": ["Rust", " actix ", "rust"],
  "experienceRequired": "3+ years",
  "education": "Not specified",
  "deadline": null
}
```"#;

pub const QUESTIONS_REPLY: &str = r#"["Explain ownership in Rust", "How does async work?", "Describe a hard bug", "How do you test services?", "Why this role?"]"#;

pub const SCORING_REPLY: &str = r#"{"scores": [
  {"score": 8, "feedback": "Clear"},
  {"score": 8, "feedback": "Solid"},
  {"score": 8, "feedback": "Good example"},
  {"score": 8, "feedback": "Practical"},
  {"score": 8, "feedback": "Motivated"}
], "report": "Strong candidate with practical experience."}"#;

/// Answers each prompt kind with a canned reply. Scoring prompts for
/// transcripts with blank answers fail, forcing the heuristic path.
pub struct StubAi {
    pub fail_all: bool,
}

#[async_trait]
impl AiClient for StubAi {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.fail_all {
            return Err(anyhow!("model unavailable"));
        }
        if prompt.contains("job posting JSON") {
            Ok(JOB_POSTING_REPLY.to_string())
        } else if prompt.contains("interview questions") {
            Ok(QUESTIONS_REPLY.to_string())
        } else if prompt.contains("(no answer)") {
            Err(anyhow!("model unavailable"))
        } else {
            Ok(SCORING_REPLY.to_string())
        }
    }
}

pub fn test_state(fail_all: bool) -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(
        Arc::new(StubAi { fail_all }),
        JWT_SECRET.to_string(),
        TOKEN_TTL_SECS,
        CookieSettings {
            secure: false,
            max_age_hours: 24,
        },
    ))
}

/// Builds the full app around `test_state`.
macro_rules! setup_app {
    ($fail_all:expr) => {{
        let state = common::test_state($fail_all);
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state)
                .wrap(recruit_ai_api::presentation::middleware::JwtAuthMiddleware::new(
                    common::JWT_SECRET,
                ))
                .configure(recruit_ai_api::presentation::routes::configure_routes),
        )
        .await
    }};
}

/// Signs a user up, logs in and returns the bearer token.
macro_rules! register_and_login {
    ($app:expr, $email:expr, $role:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({
                "fullName": "Test User",
                "email": $email,
                "password": "password123",
                "role": $role,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": "password123" }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

/// Posts a job as the given recruiter and returns its id.
macro_rules! post_job {
    ($app:expr, $token:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/job/post")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(serde_json::json!({
                "title": "Backend Engineer",
                "skills": "Rust, Actix",
                "experience": "3+ years",
                "jobType": "full-time",
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["job"]["_id"].as_str().unwrap().to_string()
    }};
}
