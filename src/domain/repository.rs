use crate::domain::interview::Interview;
use crate::domain::job::Job;
use crate::domain::shortlist::Shortlist;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: User) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn save(&self, job: Job) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Job>>;
    async fn list_by_recruiter(&self, recruiter_id: &str) -> Result<Vec<Job>>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait InterviewRepository: Send + Sync {
    async fn save(&self, interview: Interview) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Interview>>;
    /// Newest first.
    async fn list_by_jobs(&self, job_ids: &[String]) -> Result<Vec<Interview>>;
    /// Stores `interview` only if the stored copy is still pending.
    /// Returns `false` when it was already completed.
    async fn complete(&self, interview: Interview) -> Result<bool>;
}

#[async_trait]
pub trait ShortlistRepository: Send + Sync {
    async fn save(&self, shortlist: Shortlist) -> Result<()>;
    /// Newest first.
    async fn list_by_job(&self, job_id: &str) -> Result<Vec<Shortlist>>;
}
