use crate::application::prompts::{
    default_questions, parse_questions, parse_scoring, questions_prompt, scoring_prompt,
};
use crate::application::scoring::{
    apply_ai_scores, apply_heuristic_scores, attach_answers, templated_report,
};
use crate::domain::ai::AiClient;
use crate::domain::error::DomainError;
use crate::domain::interview::{
    Interview, InterviewFilter, InterviewReport, InterviewStatus, MAX_QUESTION_SCORE,
    QuestionRecord, StartInterview, SubmitAnswers,
};
use crate::domain::job::{Job, JobSummary};
use crate::domain::repository::{InterviewRepository, JobRepository};
use crate::domain::user::{Role, is_valid_email, normalize_email};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct InterviewService<I: InterviewRepository, J: JobRepository> {
    interviews: Arc<I>,
    jobs: Arc<J>,
    ai: Arc<dyn AiClient>,
}

impl<I: InterviewRepository, J: JobRepository> InterviewService<I, J> {
    pub fn new(interviews: Arc<I>, jobs: Arc<J>, ai: Arc<dyn AiClient>) -> Self {
        Self {
            interviews,
            jobs,
            ai,
        }
    }

    async fn load_job(&self, job_id: &str) -> Result<Job> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Job not found".to_string()).into())
    }

    async fn load_interview(&self, interview_id: &str) -> Result<Interview> {
        self.interviews
            .find_by_id(interview_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Interview not found".to_string()).into())
    }

    async fn generate_questions(&self, job: &Job) -> Vec<String> {
        match self.ai.generate(&questions_prompt(job)).await {
            Ok(reply) => parse_questions(&reply).unwrap_or_else(|| {
                warn!(job_id = %job.id, "AI questions unparseable; using defaults");
                default_questions()
            }),
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "AI question generation failed; using defaults");
                default_questions()
            }
        }
    }

    #[instrument(skip(self, req), fields(job_id = %req.job_id))]
    pub async fn start(&self, req: StartInterview) -> Result<Interview> {
        let candidate_name = req.candidate_name.trim().to_string();
        let candidate_email = normalize_email(&req.candidate_email);
        if candidate_name.is_empty() {
            return Err(DomainError::Validation("Candidate name is required".to_string()).into());
        }
        if !is_valid_email(&candidate_email) {
            return Err(
                DomainError::Validation("Please fill a valid email address".to_string()).into(),
            );
        }

        let job = self.load_job(&req.job_id).await?;
        if !job.is_active {
            return Err(DomainError::Validation(
                "Job is no longer accepting applications".to_string(),
            )
            .into());
        }

        let questions = self.generate_questions(&job).await;
        let interview = Interview {
            id: Uuid::new_v4().to_string(),
            candidate_name,
            candidate_email,
            job: job.id.clone(),
            status: InterviewStatus::Pending,
            max_score: questions.len() as u32 * MAX_QUESTION_SCORE,
            questions: questions.into_iter().map(QuestionRecord::unanswered).collect(),
            total_score: 0,
            report: None,
            started_at: Utc::now(),
            completed_at: None,
        };

        self.interviews.save(interview.clone()).await?;
        info!(interview_id = %interview.id, questions = interview.questions.len(), "Interview started");
        Ok(interview)
    }

    #[instrument(skip(self, req), fields(answers = req.answers.len()))]
    pub async fn submit(&self, interview_id: &str, req: SubmitAnswers) -> Result<Interview> {
        let mut interview = self.load_interview(interview_id).await?;
        if interview.status == InterviewStatus::Completed {
            return Err(already_completed());
        }

        let mut records = attach_answers(&interview.questions, &req.answers);
        let job = self.jobs.find_by_id(&interview.job).await?;
        let report = match &job {
            Some(job) => self.score_with_ai(job, &mut records).await,
            None => None,
        };
        let report = report.unwrap_or_else(|| {
            apply_heuristic_scores(&mut records);
            templated_report(&records)
        });

        interview.total_score = records.iter().map(|r| r.score).sum();
        interview.max_score = records.len() as u32 * MAX_QUESTION_SCORE;
        interview.questions = records;
        interview.report = Some(report);
        interview.status = InterviewStatus::Completed;
        interview.completed_at = Some(Utc::now());

        if !self.interviews.complete(interview.clone()).await? {
            return Err(already_completed());
        }

        info!(
            interview_id = %interview.id,
            total_score = interview.total_score,
            max_score = interview.max_score,
            "Interview submitted"
        );
        Ok(interview)
    }

    /// Scores `records` in place and returns the narrative report, or `None`
    /// when the model could not produce a usable evaluation.
    async fn score_with_ai(&self, job: &Job, records: &mut [QuestionRecord]) -> Option<String> {
        let reply = match self.ai.generate(&scoring_prompt(job, records)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "AI scoring failed; using heuristic scores");
                return None;
            }
        };
        let Some(scoring) = parse_scoring(&reply, records.len()) else {
            warn!("AI scoring reply unusable; using heuristic scores");
            return None;
        };
        apply_ai_scores(records, &scoring);
        debug!("Answers scored by AI");
        let report = scoring
            .report
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Some(report.unwrap_or_else(|| templated_report(records)))
    }

    async fn to_report(&self, interview: Interview) -> Result<InterviewReport> {
        let job = self
            .jobs
            .find_by_id(&interview.job)
            .await?
            .as_ref()
            .map(JobSummary::from);
        Ok(InterviewReport::new(interview, job))
    }

    pub async fn report(&self, interview_id: &str) -> Result<InterviewReport> {
        let interview = self.load_interview(interview_id).await?;
        self.to_report(interview).await
    }

    /// Interviews for every job the recruiter owns.
    #[instrument(skip(self, filter))]
    pub async fn list_for_recruiter(
        &self,
        recruiter_id: &str,
        role: Role,
        filter: &InterviewFilter,
    ) -> Result<Vec<InterviewReport>> {
        role.require(Role::Recruiter)?;
        let job_ids: Vec<String> = self
            .jobs
            .list_by_recruiter(recruiter_id)
            .await?
            .into_iter()
            .map(|j| j.id)
            .collect();

        let mut reports = Vec::new();
        for interview in self.interviews.list_by_jobs(&job_ids).await? {
            if filter.matches(&interview) {
                reports.push(self.to_report(interview).await?);
            }
        }
        Ok(reports)
    }

    /// Completed interviews for a job, best score first.
    pub async fn completed_for_job(&self, job_id: &str) -> Result<Vec<Interview>> {
        let mut completed: Vec<Interview> = self
            .interviews
            .list_by_jobs(&[job_id.to_string()])
            .await?
            .into_iter()
            .filter(|i| i.status == InterviewStatus::Completed)
            .collect();
        completed.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then(a.completed_at.cmp(&b.completed_at))
        });
        Ok(completed)
    }
}

fn already_completed() -> anyhow::Error {
    DomainError::Conflict("Interview already submitted".to_string()).into()
}
