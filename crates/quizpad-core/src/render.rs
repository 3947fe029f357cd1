//! Session view models handed to the board's presenter.

use alloc::string::String;

use crate::{answer::SlotStatus, score::Grade};

/// How the current question is answered and what has been entered so far.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuestionInput<'a> {
    Choice {
        options: &'a [String],
        pending: Option<u8>,
        confirmed: Option<u8>,
    },
    Text {
        draft: &'a str,
        confirmed: Option<&'a str>,
        cursor_visible: bool,
    },
}

/// One answer-sheet row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SheetRowView<'a> {
    /// 1-based question number.
    pub number: u16,
    pub status: SlotStatus,
    /// Confirmed (or pending) answer text, if any.
    pub answer: Option<&'a str>,
}

impl Default for SheetRowView<'_> {
    fn default() -> Self {
        Self {
            number: 0,
            status: SlotStatus::Unanswered,
            answer: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen<'a> {
    Loading {
        title: &'a str,
        message: &'a str,
    },
    AssessmentList {
        title: &'a str,
        /// Visible window of catalog titles.
        rows: &'a [&'a str],
        /// Cursor position within `rows`.
        cursor: usize,
        first_index: usize,
        total: usize,
    },
    TextEntry {
        prompt: &'a str,
        value: &'a str,
        cursor_visible: bool,
    },
    Question {
        title: &'a str,
        number: u16,
        total: u16,
        text: &'a str,
        input: QuestionInput<'a>,
        /// `None` for untimed assessments.
        remaining_secs: Option<u32>,
        /// Final warning threshold reached.
        urgent: bool,
    },
    PauseMenu {
        title: &'a str,
        items: &'a [&'a str],
        cursor: usize,
        remaining_secs: Option<u32>,
    },
    AnswerSheet {
        rows: &'a [SheetRowView<'a>],
        /// Cursor position within `rows`.
        cursor: usize,
        first_index: usize,
        total: usize,
    },
    Submitting {
        title: &'a str,
    },
    Result {
        title: &'a str,
        score: u16,
        total: u16,
        percentage: f32,
        grade: Grade,
    },
    Review {
        number: u16,
        total: u16,
        text: &'a str,
        given: Option<&'a str>,
        correct_answer: Option<&'a str>,
        correct: bool,
    },
    Complete {
        title: &'a str,
    },
    Error {
        message: &'a str,
    },
}

/// Display capability. Called only after `tick` requested a render.
pub trait Presenter {
    fn present(&mut self, screen: Screen<'_>);
}

impl<T: Presenter + ?Sized> Presenter for &mut T {
    fn present(&mut self, screen: Screen<'_>) {
        (**self).present(screen)
    }
}
