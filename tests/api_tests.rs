use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{App, test};
use recruit_ai_api::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use recruit_ai_api::presentation::routes::configure_routes;

#[macro_use]
mod common;

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Starts an interview and submits `answers`; returns the interview id.
macro_rules! run_interview {
    ($app:expr, $job_id:expr, $email:expr, $answers:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/interview/start")
            .set_json(serde_json::json!({
                "jobId": $job_id,
                "candidateName": "Candidate",
                "candidateEmail": $email,
            }))
            .to_request();
        let started: serde_json::Value = test::call_and_read_body_json(&$app, req).await;
        let interview_id = started["interviewId"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/interview/submit/{}", interview_id))
            .set_json(serde_json::json!({ "answers": $answers }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        interview_id
    }};
}

const ANSWERS: [&str; 5] = [
    "I have built several production services in Rust.",
    "The team works on problems I care about.",
    "Debugging and clear written communication.",
    "Migrating a monolith to services without downtime.",
    "Leading a platform team.",
];

#[actix_web::test]
async fn test_health_check() {
    let app = setup_app!(false);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().is_some());
}

#[actix_web::test]
async fn test_request_id_and_timing_headers() {
    let state = common::test_state(false);
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(JwtAuthMiddleware::new(common::JWT_SECRET))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let timing = resp.headers().get("x-response-time").unwrap();
    assert!(timing.to_str().unwrap().ends_with("ms"));
}

#[actix_web::test]
async fn test_malformed_json_is_validation_error() {
    let app = setup_app!(false);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .insert_header(ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(!error.starts_with("Validation error"));
    assert_eq!(body["details"]["message"], error);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app!(false);

    let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_shortlist_flow() {
    let app = setup_app!(false);
    let recruiter = register_and_login!(app, "recruiter@example.com", "recruiter");
    let job_id = post_job!(app, recruiter);

    let first = run_interview!(app, job_id, "first@example.com", ANSWERS);
    run_interview!(app, job_id, "blank@example.com", [""]);
    let second = run_interview!(app, job_id, "second@example.com", ANSWERS);

    // Pending interviews never make the cut.
    let req = test::TestRequest::post()
        .uri("/api/interview/start")
        .set_json(serde_json::json!({
            "jobId": job_id,
            "candidateName": "Pending",
            "candidateEmail": "pending@example.com",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/api/shortlist/{}", job_id))
        .insert_header(bearer(&recruiter))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Shortlisting complete");
    let selected = body["shortlist"]["selectedCandidates"].as_array().unwrap();
    let ids: Vec<&str> = selected
        .iter()
        .map(|c| c["interviewId"].as_str().unwrap())
        .collect();
    // Equal scores rank by who finished first.
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    assert_eq!(selected[0]["totalScore"], 40);
    assert_eq!(selected[0]["candidateEmail"], "first@example.com");

    let req = test::TestRequest::post()
        .uri(&format!("/api/shortlist/{}", job_id))
        .insert_header(bearer(&recruiter))
        .set_json(serde_json::json!({ "limit": 1 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["shortlist"]["selectedCandidates"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/shortlist/{}", job_id))
        .insert_header(bearer(&recruiter))
        .set_json(serde_json::json!({ "minPercentage": 0 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["shortlist"]["selectedCandidates"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/shortlist/{}", job_id))
        .insert_header(bearer(&recruiter))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let shortlists: serde_json::Value = test::read_body_json(resp).await;
    let shortlists = shortlists.as_array().unwrap();
    assert_eq!(shortlists.len(), 3);
    assert!(shortlists.iter().all(|s| s["job"] == job_id.as_str()));
}

#[actix_web::test]
async fn test_shortlist_requires_job_owner() {
    let app = setup_app!(false);
    let owner = register_and_login!(app, "owner@example.com", "recruiter");
    let other = register_and_login!(app, "other@example.com", "recruiter");
    let candidate = register_and_login!(app, "candidate@example.com", "candidate");
    let job_id = post_job!(app, owner);

    for (token, status) in [
        (other.as_str(), StatusCode::FORBIDDEN),
        (candidate.as_str(), StatusCode::FORBIDDEN),
    ] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/shortlist/{}", job_id))
            .insert_header(bearer(token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/shortlist/{}", job_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/shortlist/missing-job")
        .insert_header(bearer(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_shortlist_with_no_completed_interviews() {
    let app = setup_app!(false);
    let recruiter = register_and_login!(app, "recruiter@example.com", "recruiter");
    let job_id = post_job!(app, recruiter);

    let req = test::TestRequest::post()
        .uri(&format!("/api/shortlist/{}", job_id))
        .insert_header(bearer(&recruiter))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["shortlist"]["selectedCandidates"], serde_json::json!([]));
}
