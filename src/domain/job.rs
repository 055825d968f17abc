use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Contract,
    Freelance,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::Remote => "remote",
        }
    }
}

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_EXPERIENCE: &str = "0+ years";
pub const DEFAULT_EDUCATION: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default)]
    pub min: u64,
    #[serde(default)]
    pub max: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: 0,
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary_range: SalaryRange,
    pub skills_required: Vec<String>,
    pub experience_required: String,
    pub education: String,
    pub deadline: Option<DateTime<Utc>>,
    pub recruiter: String,
    pub applicants: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Condensed job data embedded in interview reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type,
        }
    }
}

/// Skills arrive either as the raw comma-separated form field or as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    pub fn to_list(&self) -> Vec<String> {
        match self {
            SkillsInput::List(items) => normalize_skills(items.iter().map(String::as_str)),
            SkillsInput::Text(text) => normalize_skills(text.split(',')),
        }
    }
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobRequest {
    pub title: String,
    #[serde(default, alias = "skillsRequired")]
    pub skills: SkillsInput,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
}

/// The AI's rendering of a posting. Every field is optional so a sloppy
/// reply still parses; the job service fills the gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_range: Option<DraftSalary>,
    #[serde(default)]
    pub skills_required: Option<Vec<String>>,
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "lenient_deadline")]
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DraftSalary {
    #[serde(default, deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (taken as
/// midnight UTC). Anything else, including `""`, is no deadline.
fn lenient_deadline<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(Value::String(raw)) = Option::<Value>::deserialize(d)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc()))
}

/// Numbers or numeric strings such as `"600000"` or `"6,00,000"`.
fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

impl DraftSalary {
    /// Negative or non-finite figures become zero, and the bounds are ordered.
    pub fn into_range(self) -> SalaryRange {
        let clean = |v: Option<f64>| match v {
            Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
            _ => 0,
        };
        let (a, b) = (clean(self.min), clean(self.max));
        let currency = self
            .currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_currency);
        SalaryRange {
            min: a.min(b),
            max: a.max(b),
            currency,
        }
    }
}

pub fn normalize_skills<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw {
        let skill = skill.trim().to_lowercase();
        if !skill.is_empty() && !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_from_comma_text() {
        let skills = SkillsInput::Text(" Rust, SQL ,, rust,Docker ".to_string());
        assert_eq!(skills.to_list(), vec!["rust", "sql", "docker"]);
    }

    #[test]
    fn test_skills_from_list() {
        let skills = SkillsInput::List(vec!["  Go".to_string(), String::new(), "K8s".to_string()]);
        assert_eq!(skills.to_list(), vec!["go", "k8s"]);
    }

    #[test]
    fn test_post_request_accepts_either_skills_shape() {
        let text: PostJobRequest = serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "skills": "rust, tokio",
            "jobType": "contract"
        }))
        .unwrap();
        assert_eq!(text.skills.to_list(), vec!["rust", "tokio"]);
        assert_eq!(text.job_type, JobType::Contract);

        let list: PostJobRequest = serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "skillsRequired": ["Rust"]
        }))
        .unwrap();
        assert_eq!(list.skills.to_list(), vec!["rust"]);
        assert_eq!(list.job_type, JobType::FullTime);
    }

    #[test]
    fn test_draft_salary_orders_and_cleans_bounds() {
        let range = DraftSalary {
            min: Some(1_200_000.4),
            max: Some(-5.0),
            currency: Some(" usd ".to_string()),
        }
        .into_range();
        assert_eq!(range.min, 0);
        assert_eq!(range.max, 1_200_000);
        assert_eq!(range.currency, "USD");

        let range = DraftSalary::default().into_range();
        assert_eq!(range, SalaryRange::default());
    }

    #[test]
    fn test_job_type_wire_names() {
        let value = serde_json::to_value(JobType::PartTime).unwrap();
        assert_eq!(value, "part-time");
        assert_eq!(JobType::FullTime.as_str(), "full-time");
    }
}
