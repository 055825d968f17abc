use crate::application::prompts::{job_posting_prompt, parse_job_draft};
use crate::domain::ai::AiClient;
use crate::domain::error::DomainError;
use crate::domain::job::{
    DEFAULT_EDUCATION, DEFAULT_EXPERIENCE, Job, JobDraft, PostJobRequest, normalize_skills,
};
use crate::domain::repository::{JobRepository, UserRepository};
use crate::domain::user::Role;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub struct JobService<J: JobRepository, U: UserRepository> {
    jobs: Arc<J>,
    users: Arc<U>,
    ai: Arc<dyn AiClient>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl<J: JobRepository, U: UserRepository> JobService<J, U> {
    pub fn new(jobs: Arc<J>, users: Arc<U>, ai: Arc<dyn AiClient>) -> Self {
        Self { jobs, users, ai }
    }

    #[instrument(skip(self, req), fields(title = %req.title, job_type = req.job_type.as_str()))]
    pub async fn post_job(&self, recruiter_id: &str, role: Role, req: PostJobRequest) -> Result<Job> {
        role.require(Role::Recruiter)?;

        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("Job title is required".to_string()).into());
        }
        let skills = req.skills.to_list();
        let experience = non_blank(req.experience).unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string());

        let prompt = job_posting_prompt(&title, &skills, &experience, req.job_type);
        let reply = self.ai.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "AI failed to generate job data");
            DomainError::Ai("AI failed to generate job data".to_string())
        })?;

        let draft: JobDraft = parse_job_draft(&reply).map_err(|e| {
            warn!(error = %e, "AI returned an unparseable job posting");
            DomainError::Ai("AI returned an invalid job posting".to_string())
        })?;
        debug!("AI job draft parsed");

        let ai_skills = draft
            .skills_required
            .as_ref()
            .map(|s| normalize_skills(s.iter().map(String::as_str)))
            .unwrap_or_default();

        let job = Job {
            id: Uuid::new_v4().to_string(),
            title: non_blank(draft.title).unwrap_or(title),
            description: non_blank(draft.description)
                .unwrap_or_else(|| format!("We are hiring a {}.", req.title.trim())),
            company: non_blank(draft.company).unwrap_or_else(|| "Confidential".to_string()),
            location: non_blank(draft.location).unwrap_or_else(|| "Remote".to_string()),
            job_type: req.job_type,
            salary_range: draft.salary_range.map(|s| s.into_range()).unwrap_or_default(),
            skills_required: if ai_skills.is_empty() { skills } else { ai_skills },
            experience_required: non_blank(draft.experience_required).unwrap_or(experience),
            education: non_blank(draft.education).unwrap_or_else(|| DEFAULT_EDUCATION.to_string()),
            deadline: draft.deadline,
            recruiter: recruiter_id.to_string(),
            applicants: Vec::new(),
            is_active: true,
            created_at: Utc::now(),
        };

        self.jobs.save(job.clone()).await?;
        info!(job_id = %job.id, recruiter_id = recruiter_id, "Job posted");
        Ok(job)
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.jobs.list().await
    }

    #[instrument(skip(self))]
    pub async fn my_jobs(&self, recruiter_id: &str, role: Role) -> Result<Vec<Job>> {
        role.require(Role::Recruiter)?;
        self.jobs.list_by_recruiter(recruiter_id).await
    }

    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Job not found".to_string()).into())
    }

    /// Loads a job and checks that `recruiter_id` owns it.
    pub async fn owned_job(&self, job_id: &str, recruiter_id: &str, role: Role) -> Result<Job> {
        role.require(Role::Recruiter)?;
        let job = self.get_job(job_id).await?;
        if job.recruiter != recruiter_id {
            warn!(job_id = job_id, recruiter_id = recruiter_id, "Recruiter does not own job");
            return Err(DomainError::Forbidden("You do not own this job".to_string()).into());
        }
        Ok(job)
    }

    #[instrument(skip(self))]
    pub async fn delete_job(&self, job_id: &str, recruiter_id: &str, role: Role) -> Result<()> {
        self.owned_job(job_id, recruiter_id, role).await?;
        if !self.jobs.delete(job_id).await? {
            return Err(DomainError::NotFound("Job not found".to_string()).into());
        }
        info!(job_id = job_id, "Job deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn apply(&self, job_id: &str, candidate_id: &str, role: Role) -> Result<Job> {
        role.require(Role::Candidate)?;
        let mut job = self.get_job(job_id).await?;
        if !job.is_active {
            return Err(DomainError::Validation(
                "Job is no longer accepting applications".to_string(),
            )
            .into());
        }
        if job.applicants.iter().any(|a| a == candidate_id) {
            return Err(DomainError::Validation("Already applied".to_string()).into());
        }

        let mut user = self
            .users
            .find_user_by_id(candidate_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;

        job.applicants.push(candidate_id.to_string());
        self.jobs.save(job.clone()).await?;

        if !user.applied_jobs.iter().any(|j| j == job_id) {
            user.applied_jobs.push(job_id.to_string());
            self.users.save_user(user).await?;
        }

        info!(job_id = job_id, candidate_id = candidate_id, "Candidate applied to job");
        Ok(job)
    }
}
