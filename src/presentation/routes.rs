use crate::presentation::auth::{login, logout, me, signup};
use crate::presentation::handlers::{health_check, json_config, path_config, query_config};
use crate::presentation::interviews::{
    interview_report, list_interviews, start_interview, submit_interview,
};
use crate::presentation::jobs::{apply, delete_job, list_jobs, my_jobs, post_job, view_job};
use crate::presentation::shortlists::{create_shortlist, list_shortlists};
use actix_web::web;

pub const ROUTES: &str = "GET /api/health, \
    POST /api/auth/{signup,login,logout}, GET /api/auth/me, \
    POST /api/job/post, GET /api/job/, GET /api/job/my-jobs, GET /api/job/view/{id}, \
    POST /api/job/apply/{id}, DELETE /api/job/{id}, \
    POST /api/interview/start, POST /api/interview/submit/{id}, \
    GET /api/interview/report/{id}, GET /api/interview/all, \
    POST /api/shortlist/{job_id}, GET /api/shortlist/{job_id}";

/// Registers the whole `/api` tree plus the extractor configs it relies on.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(signup))
                        .route("/login", web::post().to(login))
                        .route("/logout", web::post().to(logout))
                        .route("/me", web::get().to(me)),
                )
                .service(
                    web::scope("/job")
                        .route("", web::get().to(list_jobs))
                        .route("/", web::get().to(list_jobs))
                        .route("/post", web::post().to(post_job))
                        .route("/my-jobs", web::get().to(my_jobs))
                        .route("/view/{id}", web::get().to(view_job))
                        .route("/apply/{id}", web::post().to(apply))
                        .route("/{id}", web::delete().to(delete_job)),
                )
                .service(
                    web::scope("/interview")
                        .route("/start", web::post().to(start_interview))
                        .route("/submit/{id}", web::post().to(submit_interview))
                        .route("/report/{id}", web::get().to(interview_report))
                        .route("/all", web::get().to(list_interviews)),
                )
                .service(
                    web::scope("/shortlist")
                        .route("/{job_id}", web::post().to(create_shortlist))
                        .route("/{job_id}", web::get().to(list_shortlists)),
                ),
        );
}
