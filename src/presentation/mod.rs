pub mod auth;
pub mod handlers;
pub mod interviews;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod shortlists;
