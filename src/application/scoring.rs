//! Applies the model's scores to an interview, or the length heuristic when
//! the model is unavailable.

use crate::application::prompts::ScoringReply;
use crate::domain::interview::{MAX_QUESTION_SCORE, QuestionRecord};

/// Answers matched to questions by position; missing answers are empty and
/// extras are dropped.
pub fn attach_answers(questions: &[QuestionRecord], answers: &[String]) -> Vec<QuestionRecord> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionRecord {
            question: q.question.clone(),
            answer: answers.get(i).cloned().unwrap_or_default(),
            score: 0,
            feedback: None,
        })
        .collect()
}

pub fn heuristic_score(answer: &str) -> u32 {
    let len = answer.chars().count() as f64;
    let max = MAX_QUESTION_SCORE as f64;
    let mut score = (len / 10.0).min(max);
    if len > 50.0 {
        score = (score + 2.0).min(max);
    }
    score.round() as u32
}

pub fn feedback_for(score: u32) -> &'static str {
    match score {
        8.. => "Excellent response with good detail and relevance.",
        6..=7 => "Good response, could use more detail or examples.",
        4..=5 => "Adequate response, but lacks depth or clarity.",
        _ => "Response needs improvement in detail and relevance.",
    }
}

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, MAX_QUESTION_SCORE as f64) as u32
}

pub fn apply_ai_scores(records: &mut [QuestionRecord], reply: &ScoringReply) {
    for (record, scored) in records.iter_mut().zip(&reply.scores) {
        record.score = clamp_score(scored.score);
        record.feedback = Some(
            scored
                .feedback
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .unwrap_or(feedback_for(record.score))
                .to_string(),
        );
    }
}

pub fn apply_heuristic_scores(records: &mut [QuestionRecord]) {
    for record in records.iter_mut() {
        record.score = heuristic_score(&record.answer);
        record.feedback = Some(feedback_for(record.score).to_string());
    }
}

pub fn templated_report(records: &[QuestionRecord]) -> String {
    let total: u32 = records.iter().map(|r| r.score).sum();
    let max = records.len() as u32 * MAX_QUESTION_SCORE;
    let answered = records.iter().filter(|r| !r.answer.trim().is_empty()).count();
    let percentage = if max == 0 {
        0
    } else {
        (total as f64 / max as f64 * 100.0).round() as u32
    };
    let verdict = match percentage {
        80.. => "an excellent",
        70..=79 => "a good",
        50..=69 => "an average",
        _ => "a weak",
    };
    format!(
        "The candidate answered {answered} of {} questions and scored {total}/{max} ({percentage}%), \
         which is {verdict} result. Scores were computed from answer detail because the AI evaluation \
         was unavailable.",
        records.len()
    )
}
