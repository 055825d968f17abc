//! Prompt construction and tolerant parsing of the model's replies.

use crate::domain::interview::QuestionRecord;
use crate::domain::job::{Job, JobDraft, JobType};
use serde::Deserialize;

pub const QUESTION_COUNT: usize = 5;

pub const DEFAULT_QUESTIONS: [&str; QUESTION_COUNT] = [
    "Tell me about yourself and your experience",
    "Why are you interested in this position?",
    "What are your key strengths?",
    "Describe a challenging project you worked on",
    "Where do you see yourself in 5 years?",
];

pub fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

pub fn job_posting_prompt(
    title: &str,
    skills: &[String],
    experience: &str,
    job_type: JobType,
) -> String {
    format!(
        r#"You are an expert technical recruiter assistant.

Given the following inputs from a recruiter:

- title: {title}
- skills: {skills}
- experience: {experience}
- jobType: {job_type}

Generate a job posting JSON object that strictly follows this schema:

{{
  "title": string,
  "description": string (3-4 lines),
  "company": string (use "Confidential" or a generic name),
  "location": string (use "Remote" if not specified),
  "salaryRange": {{
    "min": number (reasonable lower bound in INR),
    "max": number (reasonable upper bound in INR),
    "currency": "INR"
  }},
  "skillsRequired": array of lowercase trimmed strings based on the provided skills,
  "experienceRequired": string (same as experience),
  "education": string (default to "Not specified"),
  "deadline": null
}}

Only return the JSON object. No explanation, no extra text, no backticks."#,
        skills = skills.join(", "),
        job_type = job_type.as_str(),
    )
}

pub fn questions_prompt(job: &Job) -> String {
    format!(
        r#"Generate {QUESTION_COUNT} interview questions for a {title} position requiring skills: {skills}.
Return ONLY a JSON array of strings, no extra text:
["question1", "question2", "question3", "question4", "question5"]"#,
        title = job.title,
        skills = job.skills_required.join(", "),
    )
}

pub fn scoring_prompt(job: &Job, questions: &[QuestionRecord]) -> String {
    let mut transcript = String::new();
    for (i, q) in questions.iter().enumerate() {
        let answer = if q.answer.trim().is_empty() {
            "(no answer)"
        } else {
            q.answer.as_str()
        };
        transcript.push_str(&format!("Q{n}: {}\nA{n}: {}\n\n", q.question, answer, n = i + 1));
    }

    format!(
        r#"You are evaluating a candidate's interview for a {title} position requiring skills: {skills}.

{transcript}Score each answer from 0 to 10 for relevance, depth and clarity, and give one sentence of feedback per answer.
Then write a short overall report (3-5 sentences) on the candidate's fit.

Return ONLY a JSON object, no extra text:
{{"scores": [{{"score": number, "feedback": string}}, ...one entry per question in order], "report": string}}"#,
        title = job.title,
        skills = job.skills_required.join(", "),
    )
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = if let Some(stripped) = text.strip_prefix("```json") {
        stripped
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
    } else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}

pub fn parse_job_draft(text: &str) -> Result<JobDraft, serde_json::Error> {
    serde_json::from_str(strip_json_fences(text))
}

/// `None` unless the reply is a non-empty array of non-blank strings.
pub fn parse_questions(text: &str) -> Option<Vec<String>> {
    let questions: Vec<String> = serde_json::from_str(strip_json_fences(text)).ok()?;
    let questions: Vec<String> = questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if questions.is_empty() { None } else { Some(questions) }
}

#[derive(Debug, Deserialize)]
pub struct ScoringReply {
    pub scores: Vec<ScoredAnswer>,
    #[serde(default)]
    pub report: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoredAnswer {
    pub score: f64,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// `None` when the reply is malformed or does not score every question.
pub fn parse_scoring(text: &str, expected: usize) -> Option<ScoringReply> {
    let reply: ScoringReply = serde_json::from_str(strip_json_fences(text)).ok()?;
    if reply.scores.len() < expected || reply.scores.iter().any(|s| !s.score.is_finite()) {
        return None;
    }
    Some(reply)
}
