use crate::domain::repository::ShortlistRepository;
use crate::domain::shortlist::Shortlist;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Append-only store; shortlists are never edited.
#[derive(Clone, Default)]
pub struct InMemoryShortlistRepository {
    storage: Arc<RwLock<Vec<Shortlist>>>,
}

impl InMemoryShortlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortlistRepository for InMemoryShortlistRepository {
    async fn save(&self, shortlist: Shortlist) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.push(shortlist);
        Ok(())
    }

    async fn list_by_job(&self, job_id: &str) -> Result<Vec<Shortlist>> {
        let storage = self.storage.read().await;
        let mut found: Vec<Shortlist> = storage.iter().filter(|s| s.job == job_id).cloned().collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}
