use crate::domain::job::Job;
use crate::domain::repository::JobRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryJobRepository {
    storage: Arc<RwLock<HashMap<String, Job>>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut jobs: Vec<Job>) -> Vec<Job> {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    jobs
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn save(&self, job: Job) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(job.id.clone(), job);
        debug!("Job saved to memory storage");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Job>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Job>> {
        let storage = self.storage.read().await;
        Ok(newest_first(storage.values().cloned().collect()))
    }

    async fn list_by_recruiter(&self, recruiter_id: &str) -> Result<Vec<Job>> {
        let storage = self.storage.read().await;
        Ok(newest_first(
            storage
                .values()
                .filter(|job| job.recruiter == recruiter_id)
                .cloned()
                .collect(),
        ))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{JobType, SalaryRange};
    use chrono::{Duration, Utc};

    fn job(id: &str, recruiter: &str, age_minutes: i64) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Job {}", id),
            description: "Build things".to_string(),
            company: "Confidential".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_range: SalaryRange::default(),
            skills_required: vec!["rust".to_string()],
            experience_required: "2+ years".to_string(),
            education: "Not specified".to_string(),
            deadline: None,
            recruiter: recruiter.to_string(),
            applicants: Vec::new(),
            is_active: true,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryJobRepository::new();
        repo.save(job("old", "r1", 30)).await.unwrap();
        repo.save(job("new", "r1", 1)).await.unwrap();
        repo.save(job("mid", "r2", 10)).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_list_by_recruiter_filters_owner() {
        let repo = InMemoryJobRepository::new();
        repo.save(job("a", "r1", 5)).await.unwrap();
        repo.save(job("b", "r2", 4)).await.unwrap();

        let mine = repo.list_by_recruiter("r1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "a");
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let repo = InMemoryJobRepository::new();
        repo.save(job("a", "r1", 5)).await.unwrap();

        assert!(repo.delete("a").await.unwrap());
        assert!(!repo.delete("a").await.unwrap());
        assert!(repo.find_by_id("a").await.unwrap().is_none());
    }
}
