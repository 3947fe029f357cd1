//! Downloaded assessment content.

use alloc::{string::String, vec::Vec};

/// Catalog entry returned by a list endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssessmentSummary {
    pub id: String,
    pub title: String,
}

/// When the score is shown to the student.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RevealPolicy {
    #[default]
    Immediate,
    Deferred,
}

impl RevealPolicy {
    pub const fn from_flag(show_results_immediate: bool) -> Self {
        if show_results_immediate {
            Self::Immediate
        } else {
            Self::Deferred
        }
    }
}

/// One question. `Key` is the kind-specific correct answer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question<Key> {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub key: Key,
}

/// Immutable once downloaded; owned by the active session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assessment<Key> {
    pub id: String,
    pub title: String,
    /// `None` for untimed assessments.
    pub duration_secs: Option<u32>,
    pub reveal: RevealPolicy,
    pub questions: Vec<Question<Key>>,
}

impl<Key> Assessment<Key> {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
