pub mod ai;
pub mod error;
pub mod interview;
pub mod job;
pub mod repository;
pub mod shortlist;
pub mod user;
