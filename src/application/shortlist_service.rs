use crate::domain::interview::Interview;
use crate::domain::repository::ShortlistRepository;
use crate::domain::shortlist::{
    DEFAULT_MIN_PERCENTAGE, SelectedCandidate, Shortlist, ShortlistCriteria,
};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct ShortlistService<S: ShortlistRepository> {
    shortlists: Arc<S>,
}

/// Keeps interviews at or above the threshold, in the given (ranked) order,
/// and truncates to `limit`.
pub fn select_candidates(ranked: &[Interview], criteria: &ShortlistCriteria) -> Vec<SelectedCandidate> {
    let min_percentage = criteria.min_percentage.unwrap_or(DEFAULT_MIN_PERCENTAGE);
    ranked
        .iter()
        .filter(|i| i.percentage() >= min_percentage)
        .take(criteria.limit.unwrap_or(usize::MAX))
        .map(|i| SelectedCandidate {
            candidate_name: i.candidate_name.clone(),
            candidate_email: i.candidate_email.clone(),
            total_score: i.total_score,
            interview_id: i.id.clone(),
        })
        .collect()
}

impl<S: ShortlistRepository> ShortlistService<S> {
    pub fn new(shortlists: Arc<S>) -> Self {
        Self { shortlists }
    }

    /// `ranked` must already be the job's completed interviews, best first.
    /// Ownership of the job is checked by the caller.
    #[instrument(skip(self, ranked, criteria), fields(candidates = ranked.len()))]
    pub async fn create(
        &self,
        job_id: &str,
        recruiter_id: &str,
        ranked: &[Interview],
        criteria: &ShortlistCriteria,
    ) -> Result<Shortlist> {
        let shortlist = Shortlist {
            id: Uuid::new_v4().to_string(),
            job: job_id.to_string(),
            recruiter: recruiter_id.to_string(),
            selected_candidates: select_candidates(ranked, criteria),
            created_at: Utc::now(),
        };
        self.shortlists.save(shortlist.clone()).await?;
        info!(
            shortlist_id = %shortlist.id,
            selected = shortlist.selected_candidates.len(),
            "Shortlist created"
        );
        Ok(shortlist)
    }

    pub async fn list(&self, job_id: &str) -> Result<Vec<Shortlist>> {
        self.shortlists.list_by_job(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::shortlist_repository::InMemoryShortlistRepository;
    use crate::domain::interview::InterviewStatus;

    fn completed(id: &str, total: u32) -> Interview {
        Interview {
            id: id.to_string(),
            candidate_name: format!("Candidate {}", id),
            candidate_email: format!("{}@example.com", id),
            job: "job-1".to_string(),
            status: InterviewStatus::Completed,
            questions: Vec::new(),
            total_score: total,
            max_score: 50,
            report: None,
            started_at: Utc::now(),
            completed_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_select_applies_threshold_and_limit() {
        let ranked = vec![completed("a", 45), completed("b", 30), completed("c", 25), completed("d", 10)];

        let default = select_candidates(&ranked, &ShortlistCriteria::default());
        let ids: Vec<&str> = default.iter().map(|c| c.interview_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let limited = select_candidates(
            &ranked,
            &ShortlistCriteria {
                limit: Some(1),
                min_percentage: Some(0),
            },
        );
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].total_score, 45);

        let strict = select_candidates(
            &ranked,
            &ShortlistCriteria {
                limit: None,
                min_percentage: Some(95),
            },
        );
        assert!(strict.is_empty());
    }

    #[tokio::test]
    async fn test_create_persists_shortlist() {
        let svc = ShortlistService::new(Arc::new(InMemoryShortlistRepository::new()));
        let ranked = vec![completed("a", 40)];

        let created = svc
            .create("job-1", "rec-1", &ranked, &ShortlistCriteria::default())
            .await
            .unwrap();
        assert_eq!(created.selected_candidates.len(), 1);

        let stored = svc.list("job-1").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, created.id);
        assert!(svc.list("job-2").await.unwrap().is_empty());
    }
}
