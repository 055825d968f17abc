pub mod auth_service;
pub mod interview_service;
pub mod job_service;
pub mod prompts;
pub mod scoring;
pub mod shortlist_service;
