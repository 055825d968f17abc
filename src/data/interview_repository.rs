use crate::domain::interview::{Interview, InterviewStatus};
use crate::domain::repository::InterviewRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct InMemoryInterviewRepository {
    storage: Arc<RwLock<HashMap<String, Interview>>>,
}

impl InMemoryInterviewRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryInterviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewRepository {
    #[instrument(skip(self, interview), fields(interview_id = %interview.id))]
    async fn save(&self, interview: Interview) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(interview.id.clone(), interview);
        debug!("Interview saved to memory storage");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Interview>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn list_by_jobs(&self, job_ids: &[String]) -> Result<Vec<Interview>> {
        let storage = self.storage.read().await;
        let mut interviews: Vec<Interview> = storage
            .values()
            .filter(|i| job_ids.contains(&i.job))
            .cloned()
            .collect();
        interviews.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(interviews)
    }

    #[instrument(skip(self, interview), fields(interview_id = %interview.id))]
    async fn complete(&self, interview: Interview) -> Result<bool> {
        // Check and write under one lock so two submissions cannot both win.
        let mut storage = self.storage.write().await;
        let pending = matches!(
            storage.get(&interview.id),
            Some(stored) if stored.status == InterviewStatus::Pending
        );
        if !pending {
            warn!("Interview is not pending; completion rejected");
            return Ok(false);
        }
        storage.insert(interview.id.clone(), interview);
        debug!("Interview marked completed");
        Ok(true)
    }
}
