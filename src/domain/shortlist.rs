use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PERCENTAGE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCandidate {
    pub candidate_name: String,
    pub candidate_email: String,
    pub total_score: u32,
    pub interview_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortlist {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub job: String,
    pub recruiter: String,
    pub selected_candidates: Vec<SelectedCandidate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistCriteria {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub min_percentage: Option<u32>,
}
