//! JSON payload shapes of the study backend.
//!
//! Field names follow the deployed service. Missing `duration_minutes` on an
//! exam means 30 minutes; missing `show_results_immediate` means `true`.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::ContentError,
    kind::QuizKey,
    model::{Assessment, AssessmentSummary, Question, RevealPolicy},
};

pub const DEFAULT_EXAM_DURATION_MINUTES: u32 = 30;

/// Answer value submitted for an unanswered question.
pub const UNANSWERED: i32 = -1;

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(text) => text,
        IdRepr::Number(number) => number.to_string(),
    })
}

#[derive(Deserialize)]
struct SummaryDto {
    #[serde(deserialize_with = "id_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct ExamDto {
    #[serde(deserialize_with = "id_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration_minutes: Option<u32>,
    #[serde(default)]
    show_results_immediate: Option<bool>,
    #[serde(default)]
    questions: Vec<ExamQuestionDto>,
}

#[derive(Deserialize)]
struct ExamQuestionDto {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_option: Option<i64>,
}

#[derive(Deserialize)]
struct QuizDto {
    #[serde(deserialize_with = "id_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration_minutes: Option<u32>,
    #[serde(default)]
    show_results_immediate: Option<bool>,
    #[serde(default)]
    questions: Vec<QuizQuestionDto>,
}

#[derive(Deserialize)]
struct QuizQuestionDto {
    #[serde(default)]
    id: u32,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
}

/// Body of `POST /results`.
#[derive(Debug, Serialize)]
pub struct ResultSubmission<'a> {
    pub exam_id: &'a str,
    pub student_name: &'a str,
    pub student_id: &'a str,
    pub score: u16,
    pub total_questions: u16,
    pub answers: Vec<i32>,
}

impl ResultSubmission<'_> {
    pub fn to_json(&self) -> Result<Vec<u8>, ContentError> {
        serde_json::to_vec(self).map_err(|_| ContentError::SubmissionFailed)
    }
}

/// Parse a list endpoint body (`[{id, title}, ...]`).
pub fn parse_catalog(body: &[u8]) -> Result<Vec<AssessmentSummary>, ContentError> {
    let entries: Vec<SummaryDto> = serde_json::from_slice(body)?;
    Ok(entries
        .into_iter()
        .map(|entry| AssessmentSummary {
            title: entry.title.unwrap_or_else(|| entry.id.clone()),
            id: entry.id,
        })
        .collect())
}

/// Parse `GET /exams/{id}`.
pub fn parse_exam(body: &[u8]) -> Result<Assessment<Option<u8>>, ContentError> {
    let exam: ExamDto = serde_json::from_slice(body)?;
    let minutes = exam
        .duration_minutes
        .unwrap_or(DEFAULT_EXAM_DURATION_MINUTES);

    Ok(Assessment {
        title: exam.title.unwrap_or_else(|| exam.id.clone()),
        id: exam.id,
        duration_secs: Some(minutes.saturating_mul(60)),
        reveal: RevealPolicy::from_flag(exam.show_results_immediate.unwrap_or(true)),
        questions: exam
            .questions
            .into_iter()
            .map(|q| Question {
                id: q.id,
                text: q.text,
                options: q.options,
                key: q.correct_option.and_then(|v| u8::try_from(v).ok()),
            })
            .collect(),
    })
}

/// Parse `GET /quizzes/{id}`. Quizzes without `duration_minutes` are untimed.
pub fn parse_quiz(body: &[u8]) -> Result<Assessment<QuizKey>, ContentError> {
    let quiz: QuizDto = serde_json::from_slice(body)?;

    Ok(Assessment {
        title: quiz.title.unwrap_or_else(|| quiz.id.clone()),
        id: quiz.id,
        duration_secs: quiz.duration_minutes.map(|m| m.saturating_mul(60)),
        reveal: RevealPolicy::from_flag(quiz.show_results_immediate.unwrap_or(true)),
        questions: quiz
            .questions
            .into_iter()
            .map(|q| {
                let key = if q.kind.eq_ignore_ascii_case("mcq") {
                    QuizKey::Choice(q.correct_answer.as_deref().and_then(choice_key))
                } else {
                    QuizKey::Text(q.correct_answer.unwrap_or_default())
                };
                Question {
                    id: q.id,
                    text: q.text,
                    options: q.options.unwrap_or_default(),
                    key,
                }
            })
            .collect(),
    })
}

/// MCQ keys arrive as an index (`"1"`) or an option letter (`"B"`).
fn choice_key(answer: &str) -> Option<u8> {
    let answer = answer.trim();
    if let Ok(index) = answer.parse::<u8>() {
        return Some(index);
    }
    match answer.as_bytes() {
        [letter @ (b'A'..=b'D' | b'a'..=b'd')] => Some(letter.to_ascii_uppercase() - b'A'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_accepts_string_and_numeric_ids() {
        let list = parse_catalog(br#"[{"id":"midterm","title":"Midterm"},{"id":7,"title":"Pop"}]"#)
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "midterm");
        assert_eq!(list[1].id, "7");
        assert_eq!(list[1].title, "Pop");
    }

    #[test]
    fn empty_catalog_parses_to_empty_list() {
        assert!(parse_catalog(b"[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert_eq!(parse_catalog(b"{not json"), Err(ContentError::Parse));
        assert_eq!(parse_exam(b"[1,2]").map(|_| ()), Err(ContentError::Parse));
    }

    #[test]
    fn exam_defaults_apply_when_fields_missing() {
        let exam = parse_exam(
            br#"{"id":"e1","title":"Bio","questions":[
                {"id":1,"text":"Q1","correct_option":1,"options":["a","b","c","d"]},
                {"id":2,"text":"Q2","options":["x","y"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(exam.duration_secs, Some(30 * 60));
        assert_eq!(exam.reveal, RevealPolicy::Immediate);
        assert_eq!(exam.questions[0].key, Some(1));
        assert_eq!(exam.questions[1].key, None);
        assert_eq!(exam.questions[1].options.len(), 2);
    }

    #[test]
    fn exam_explicit_fields_are_honoured() {
        let exam = parse_exam(
            br#"{"id":"e2","title":"Chem","duration_minutes":45,"show_results_immediate":false,
                "questions":[{"id":1,"text":"Q","correct_option":-1,"options":[]}]}"#,
        )
        .unwrap();
        assert_eq!(exam.duration_secs, Some(45 * 60));
        assert_eq!(exam.reveal, RevealPolicy::Deferred);
        assert_eq!(exam.questions[0].key, None);
    }

    #[test]
    fn quiz_question_types_map_to_keys() {
        let quiz = parse_quiz(
            br#"{"id":3,"title":"Caps","questions":[
                {"id":1,"type":"mcq","text":"2+2","options":["3","4"],"correct_answer":"1"},
                {"id":2,"type":"short_answer","text":"Capital of France","correct_answer":"Paris"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quiz.id, "3");
        assert_eq!(quiz.duration_secs, None);
        assert_eq!(quiz.questions[0].key, QuizKey::Choice(Some(1)));
        assert_eq!(quiz.questions[1].key, QuizKey::Text("Paris".into()));
        assert!(quiz.questions[1].options.is_empty());
    }

    #[test]
    fn quiz_mcq_key_accepts_option_letters() {
        let quiz = parse_quiz(
            br#"{"id":4,"title":"Gen","questions":[
                {"id":1,"type":"mcq","text":"Q1","options":["A) a","B) b","C) c","D) d"],"correct_answer":"A"},
                {"id":2,"type":"mcq","text":"Q2","options":["A) a","B) b","C) c","D) d"],"correct_answer":" d "},
                {"id":3,"type":"mcq","text":"Q3","options":["A) a","B) b"],"correct_answer":"E"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quiz.questions[0].key, QuizKey::Choice(Some(0)));
        assert_eq!(quiz.questions[1].key, QuizKey::Choice(Some(3)));
        assert_eq!(quiz.questions[2].key, QuizKey::Choice(None));

        let mut slots = crate::answer::fresh_sheet::<crate::kind::QuizAnswer>(3);
        slots[0].confirm(crate::kind::QuizAnswer::Choice(0));
        let outcome = crate::score::score::<crate::kind::Quiz>(&quiz.questions, &slots);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn submission_uses_backend_field_names() {
        let submission = ResultSubmission {
            exam_id: "e1",
            student_name: "Ada",
            student_id: "42",
            score: 1,
            total_questions: 2,
            answers: vec![1, UNANSWERED],
        };
        let json = String::from_utf8(submission.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"exam_id":"e1","student_name":"Ada","student_id":"42","score":1,"total_questions":2,"answers":[1,-1]}"#
        );
    }
}
