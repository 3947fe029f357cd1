//! Audio/LED feedback capability.
//!
//! The board maps each [`Cue`] to its buzzer pattern and LED flash.

use crate::{clock::TimeWarning, score::Standing};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cue {
    /// Navigation or tentative selection.
    Click,
    /// Answer committed or menu item activated.
    Confirm,
    Warning(TimeWarning),
    TimeUp,
    Error,
    Result(Standing),
    /// Session finished without showing a score.
    Complete,
}

pub trait Feedback {
    fn cue(&mut self, cue: Cue);
}

impl<T: Feedback + ?Sized> Feedback for &mut T {
    fn cue(&mut self, cue: Cue) {
        (**self).cue(cue)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn cue(&mut self, _cue: Cue) {}
}
