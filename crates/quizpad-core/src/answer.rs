//! Two-phase select-then-confirm answer state.

use alloc::vec::Vec;

/// Result of applying a selection to a slot, used to pick a feedback cue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnswerSignal {
    Selected,
    Confirmed,
}

/// Display status of one answer-sheet row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotStatus {
    Unanswered,
    Pending,
    Confirmed,
}

/// Answer state for a single question.
///
/// `confirmed` is sticky once set and is the only value scoring looks at.
/// `pending` is a tentative selection; it is reseeded from `confirmed`
/// whenever the question becomes current again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswerSlot<A> {
    pending: Option<A>,
    confirmed: Option<A>,
}

impl<A> Default for AnswerSlot<A> {
    fn default() -> Self {
        Self {
            pending: None,
            confirmed: None,
        }
    }
}

impl<A: Clone + PartialEq> AnswerSlot<A> {
    pub const fn new() -> Self {
        Self {
            pending: None,
            confirmed: None,
        }
    }

    pub fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    pub fn confirmed(&self) -> Option<&A> {
        self.confirmed.as_ref()
    }

    /// Select `choice`: a repeat of the pending choice commits it, anything
    /// else becomes the new pending choice without touching `confirmed`.
    pub fn select(&mut self, choice: A) -> AnswerSignal {
        if self.pending.as_ref() == Some(&choice) {
            self.pending = None;
            self.confirmed = Some(choice);
            AnswerSignal::Confirmed
        } else {
            self.pending = Some(choice);
            AnswerSignal::Selected
        }
    }

    /// Commit `answer` directly (typed answers confirmed with Enter).
    pub fn confirm(&mut self, answer: A) -> AnswerSignal {
        self.pending = None;
        self.confirmed = Some(answer);
        AnswerSignal::Confirmed
    }

    /// Called when this question becomes current after navigation.
    pub fn reseed(&mut self) {
        self.pending = self.confirmed.clone();
    }

    pub fn status(&self) -> SlotStatus {
        if self.confirmed.is_some() {
            SlotStatus::Confirmed
        } else if self.pending.is_some() {
            SlotStatus::Pending
        } else {
            SlotStatus::Unanswered
        }
    }
}

/// One fresh slot per question.
pub fn fresh_sheet<A: Clone + PartialEq>(question_count: usize) -> Vec<AnswerSlot<A>> {
    let mut sheet = Vec::with_capacity(question_count);
    sheet.resize_with(question_count, AnswerSlot::new);
    sheet
}
