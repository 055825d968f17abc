pub mod interview_repository;
pub mod job_repository;
pub mod shortlist_repository;
pub mod user_repository;
