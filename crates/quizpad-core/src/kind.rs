//! Assessment kinds: where content lives and how answers are compared.
//!
//! The session engine is generic over [`AssessmentKind`]. Exams are
//! multiple-choice only and collect the student's identity; quizzes mix
//! multiple-choice with typed short answers graded case-insensitively.

use alloc::{format, string::String};
use core::fmt;

use crate::{
    content::wire,
    error::ContentError,
    model::{Assessment, Question},
};

/// How the current question takes its answer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnswerMode {
    /// Buttons A-D pick option 0-3.
    Choice,
    /// Keyboard text confirmed with Enter.
    Text,
}

pub trait AssessmentKind {
    /// Correct answer as downloaded.
    type Key: Clone + fmt::Debug;
    /// Student answer stored in an answer slot.
    type Answer: Clone + PartialEq + fmt::Debug;

    /// Short lowercase label for logs.
    const NAME: &'static str;
    /// Heading shown while the catalog loads.
    const LABEL: &'static str;
    const LIST_PATH: &'static str;
    /// Student name/ID must be entered before download.
    const REQUIRES_IDENTITY: bool;
    /// Results endpoint; `None` when this kind is not uploaded.
    const SUBMIT_PATH: Option<&'static str>;

    fn parse(body: &[u8]) -> Result<Assessment<Self::Key>, ContentError>;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::LIST_PATH, id)
    }

    fn mode(question: &Question<Self::Key>) -> AnswerMode;

    /// Answer for option `index`, or `None` when the question has no such
    /// option or does not take choices.
    fn choice(question: &Question<Self::Key>, index: u8) -> Option<Self::Answer>;

    /// Answer for typed `text`, or `None` when the question is not typed or
    /// the text is empty.
    fn typed(question: &Question<Self::Key>, text: &str) -> Option<Self::Answer>;

    fn is_correct(question: &Question<Self::Key>, answer: &Self::Answer) -> bool;

    fn choice_index(answer: &Self::Answer) -> Option<u8>;

    /// Human-readable form of `answer` for review screens.
    fn answer_text<'a>(question: &'a Question<Self::Key>, answer: &'a Self::Answer) -> &'a str;

    fn key_text(question: &Question<Self::Key>) -> Option<&str>;

    /// Integer encoding used in result uploads, `-1` when unanswered.
    fn wire_answer(answer: Option<&Self::Answer>) -> i32;
}

fn option_text<K>(question: &Question<K>, index: u8) -> Option<&str> {
    question.options.get(index as usize).map(String::as_str)
}

/// Timed multiple-choice exam uploaded to `/results`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Exam;

impl AssessmentKind for Exam {
    type Key = Option<u8>;
    type Answer = u8;

    const NAME: &'static str = "exam";
    const LABEL: &'static str = "Exams";
    const LIST_PATH: &'static str = "/exams";
    const REQUIRES_IDENTITY: bool = true;
    const SUBMIT_PATH: Option<&'static str> = Some("/results");

    fn parse(body: &[u8]) -> Result<Assessment<Self::Key>, ContentError> {
        wire::parse_exam(body)
    }

    fn mode(_question: &Question<Self::Key>) -> AnswerMode {
        AnswerMode::Choice
    }

    fn choice(question: &Question<Self::Key>, index: u8) -> Option<Self::Answer> {
        ((index as usize) < question.options.len()).then_some(index)
    }

    fn typed(_question: &Question<Self::Key>, _text: &str) -> Option<Self::Answer> {
        None
    }

    fn is_correct(question: &Question<Self::Key>, answer: &Self::Answer) -> bool {
        question.key == Some(*answer)
    }

    fn choice_index(answer: &Self::Answer) -> Option<u8> {
        Some(*answer)
    }

    fn answer_text<'a>(question: &'a Question<Self::Key>, answer: &'a Self::Answer) -> &'a str {
        option_text(question, *answer).unwrap_or("?")
    }

    fn key_text(question: &Question<Self::Key>) -> Option<&str> {
        question.key.and_then(|index| option_text(question, index))
    }

    fn wire_answer(answer: Option<&Self::Answer>) -> i32 {
        answer.map_or(wire::UNANSWERED, |&index| index as i32)
    }
}

/// Correct answer of a quiz question.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QuizKey {
    /// `mcq`: option index, `None` when the backend sent no usable index.
    Choice(Option<u8>),
    /// `short_answer`: expected text.
    Text(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QuizAnswer {
    Choice(u8),
    Text(String),
}

/// Practice quiz mixing choice and typed questions. Not uploaded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Quiz;

impl AssessmentKind for Quiz {
    type Key = QuizKey;
    type Answer = QuizAnswer;

    const NAME: &'static str = "quiz";
    const LABEL: &'static str = "Quizzes";
    const LIST_PATH: &'static str = "/quizzes";
    const REQUIRES_IDENTITY: bool = false;
    const SUBMIT_PATH: Option<&'static str> = None;

    fn parse(body: &[u8]) -> Result<Assessment<Self::Key>, ContentError> {
        wire::parse_quiz(body)
    }

    fn mode(question: &Question<Self::Key>) -> AnswerMode {
        match question.key {
            QuizKey::Choice(_) => AnswerMode::Choice,
            QuizKey::Text(_) => AnswerMode::Text,
        }
    }

    fn choice(question: &Question<Self::Key>, index: u8) -> Option<Self::Answer> {
        match question.key {
            QuizKey::Choice(_) if (index as usize) < question.options.len() => {
                Some(QuizAnswer::Choice(index))
            }
            _ => None,
        }
    }

    fn typed(question: &Question<Self::Key>, text: &str) -> Option<Self::Answer> {
        match question.key {
            QuizKey::Text(_) if !text.is_empty() => Some(QuizAnswer::Text(text.into())),
            _ => None,
        }
    }

    fn is_correct(question: &Question<Self::Key>, answer: &Self::Answer) -> bool {
        match (&question.key, answer) {
            (QuizKey::Choice(Some(key)), QuizAnswer::Choice(choice)) => key == choice,
            (QuizKey::Text(key), QuizAnswer::Text(text)) => {
                !key.is_empty() && key.eq_ignore_ascii_case(text)
            }
            _ => false,
        }
    }

    fn choice_index(answer: &Self::Answer) -> Option<u8> {
        match answer {
            QuizAnswer::Choice(index) => Some(*index),
            QuizAnswer::Text(_) => None,
        }
    }

    fn answer_text<'a>(question: &'a Question<Self::Key>, answer: &'a Self::Answer) -> &'a str {
        match answer {
            QuizAnswer::Choice(index) => option_text(question, *index).unwrap_or("?"),
            QuizAnswer::Text(text) => text.as_str(),
        }
    }

    fn key_text(question: &Question<Self::Key>) -> Option<&str> {
        match &question.key {
            QuizKey::Choice(key) => key.and_then(|index| option_text(question, index)),
            QuizKey::Text(text) if !text.is_empty() => Some(text.as_str()),
            QuizKey::Text(_) => None,
        }
    }

    fn wire_answer(answer: Option<&Self::Answer>) -> i32 {
        match answer {
            Some(QuizAnswer::Choice(index)) => *index as i32,
            _ => wire::UNANSWERED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_question(options: usize, key: Option<u8>) -> Question<Option<u8>> {
        Question {
            id: 1,
            text: "Q".into(),
            options: (0..options).map(|i| i.to_string()).collect(),
            key,
        }
    }

    #[test]
    fn exam_choice_respects_option_count() {
        let q = exam_question(3, Some(2));
        assert_eq!(Exam::choice(&q, 2), Some(2));
        assert_eq!(Exam::choice(&q, 3), None);
        assert!(Exam::is_correct(&q, &2));
        assert!(!Exam::is_correct(&q, &1));
    }

    #[test]
    fn exam_without_key_never_scores() {
        let q = exam_question(4, None);
        for choice in 0..4 {
            assert!(!Exam::is_correct(&q, &choice));
        }
        assert_eq!(Exam::key_text(&q), None);
    }

    #[test]
    fn exam_paths_and_wire_answers() {
        assert_eq!(Exam::item_path("mid-1"), "/exams/mid-1");
        assert_eq!(Exam::wire_answer(None), -1);
        assert_eq!(Exam::wire_answer(Some(&3)), 3);
    }

    #[test]
    fn quiz_text_compares_case_insensitively() {
        let q = Question {
            id: 2,
            text: "Capital of France".into(),
            options: vec![],
            key: QuizKey::Text("Paris".into()),
        };
        assert_eq!(Quiz::mode(&q), AnswerMode::Text);
        assert_eq!(Quiz::choice(&q, 0), None);
        assert_eq!(Quiz::typed(&q, ""), None);
        let answer = Quiz::typed(&q, "pARIS").unwrap();
        assert!(Quiz::is_correct(&q, &answer));
        assert!(!Quiz::is_correct(&q, &QuizAnswer::Text("Lyon".into())));
        assert_eq!(Quiz::answer_text(&q, &answer), "pARIS");
        assert_eq!(Quiz::key_text(&q), Some("Paris"));
    }

    #[test]
    fn quiz_choice_question_ignores_text() {
        let q = Question {
            id: 1,
            text: "2+2".into(),
            options: vec!["3".into(), "4".into()],
            key: QuizKey::Choice(Some(1)),
        };
        assert_eq!(Quiz::mode(&q), AnswerMode::Choice);
        assert_eq!(Quiz::typed(&q, "4"), None);
        assert_eq!(Quiz::choice(&q, 1), Some(QuizAnswer::Choice(1)));
        assert_eq!(Quiz::choice(&q, 2), None);
        assert!(Quiz::is_correct(&q, &QuizAnswer::Choice(1)));
        assert_eq!(Quiz::key_text(&q), Some("4"));
        assert_eq!(Quiz::item_path("9"), "/quizzes/9");
    }
}
