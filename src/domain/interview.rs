use crate::domain::job::JobSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_QUESTION_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl QuestionRecord {
    pub fn unanswered(question: String) -> Self {
        Self {
            question,
            answer: String::new(),
            score: 0,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job: String,
    pub status: InterviewStatus,
    pub questions: Vec<QuestionRecord>,
    pub total_score: u32,
    pub max_score: u32,
    pub report: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Interview {
    /// Total score as a share of the maximum, 0..=100.
    pub fn percentage(&self) -> u32 {
        if self.max_score == 0 {
            0
        } else {
            ((self.total_score as f64 / self.max_score as f64) * 100.0).round() as u32
        }
    }
}

/// Interview with its job resolved, as served by the report endpoints.
/// `job` is `None` (serialised as `null`) once the job has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewReport {
    #[serde(rename = "_id")]
    pub id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job: Option<JobSummary>,
    pub status: InterviewStatus,
    pub questions: Vec<QuestionRecord>,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub report: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InterviewReport {
    pub fn new(interview: Interview, job: Option<JobSummary>) -> Self {
        Self {
            percentage: interview.percentage(),
            id: interview.id,
            candidate_name: interview.candidate_name,
            candidate_email: interview.candidate_email,
            job,
            status: interview.status,
            questions: interview.questions,
            total_score: interview.total_score,
            max_score: interview.max_score,
            report: interview.report,
            started_at: interview.started_at,
            completed_at: interview.completed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterview {
    pub job_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswers {
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewFilter {
    pub status: Option<InterviewStatus>,
    pub job_id: Option<String>,
}

impl InterviewFilter {
    pub fn matches(&self, interview: &Interview) -> bool {
        self.status.is_none_or(|s| s == interview.status)
            && self.job_id.as_deref().is_none_or(|id| id == interview.job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interview(total: u32, max: u32) -> Interview {
        Interview {
            id: "i-1".to_string(),
            candidate_name: "Ada".to_string(),
            candidate_email: "ada@example.com".to_string(),
            job: "job-1".to_string(),
            status: InterviewStatus::Pending,
            questions: Vec::new(),
            total_score: total,
            max_score: max,
            report: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(interview(0, 0).percentage(), 0);
        assert_eq!(interview(25, 50).percentage(), 50);
        assert_eq!(interview(33, 50).percentage(), 66);
        assert_eq!(interview(50, 50).percentage(), 100);
    }

    #[test]
    fn test_filter_matches() {
        let item = interview(10, 50);
        assert!(InterviewFilter::default().matches(&item));

        let by_status = InterviewFilter {
            status: Some(InterviewStatus::Completed),
            job_id: None,
        };
        assert!(!by_status.matches(&item));

        let by_job = InterviewFilter {
            status: None,
            job_id: Some("job-1".to_string()),
        };
        assert!(by_job.matches(&item));
    }

    #[test]
    fn test_report_wire_shape() {
        let report = InterviewReport::new(interview(20, 50), None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["_id"], "i-1");
        assert_eq!(value["candidateName"], "Ada");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["totalScore"], 20);
        assert_eq!(value["percentage"], 40);
        assert!(value["job"].is_null());
        assert!(value.get("id").is_none());
        assert!(value.get("jobDetails").is_none());

        let summary = JobSummary {
            id: "job-1".to_string(),
            title: "Rust Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: crate::domain::job::JobType::FullTime,
        };
        let value = serde_json::to_value(InterviewReport::new(interview(20, 50), Some(summary))).unwrap();
        assert_eq!(value["job"]["_id"], "job-1");
        assert_eq!(value["job"]["title"], "Rust Engineer");
        assert_eq!(value["job"]["type"], "full-time");
    }

    #[test]
    fn test_interview_id_accepts_either_name() {
        let mut value = serde_json::to_value(interview(0, 0)).unwrap();
        assert_eq!(value["_id"], "i-1");
        let id = value.as_object_mut().unwrap().remove("_id").unwrap();
        value["id"] = id;
        let parsed: Interview = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.id, "i-1");
    }
}
