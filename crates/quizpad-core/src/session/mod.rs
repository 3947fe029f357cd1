//! Timed assessment session state machine.
//!
//! One engine runs one assessment from catalog download to result screen.
//! The board calls [`SessionEngine::tick`] once per loop with that tick's
//! [`InputFrame`] and repaints through [`SessionEngine::with_screen`] when a
//! render is requested.

use alloc::vec::Vec;
use core::marker::PhantomData;

use heapless::Vec as HVec;
use log::{debug, info, warn};

use crate::{
    answer::{AnswerSignal, AnswerSlot, fresh_sheet},
    clock::{SessionClock, WarningLatch},
    config::{MAX_OVERVIEW_ROWS, SessionConfig},
    content::{
        ContentSource, Fetch, Request, Response,
        wire::{self, ResultSubmission},
    },
    error::ContentError,
    feedback::{Cue, Feedback},
    input::{
        Button, InputFrame, Key,
        dial::{DialMapper, DialTracker},
        edge::{EdgeDetector, EdgeEvent},
    },
    kind::{AnswerMode, AssessmentKind, Exam, Quiz},
    model::{Assessment, AssessmentSummary, RevealPolicy},
    overview::OverviewCursor,
    render::{Presenter, QuestionInput, Screen, SheetRowView},
    score::{self, Outcome},
};

/// Capacity of each identity field.
pub const IDENTITY_BYTES: usize = 32;
/// Capacity of a typed answer.
pub const ANSWER_BYTES: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Text field being collected before an exam download.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdentityField {
    Name,
    StudentId,
}

impl IdentityField {
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Name => "Student name",
            Self::StudentId => "Student ID",
        }
    }
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionExit {
    /// Result or completion screen acknowledged.
    Completed,
    /// Left from the pause menu without submitting.
    Abandoned,
    /// Backed out before an assessment started.
    Cancelled,
    /// Empty catalog acknowledged.
    NoContent,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Init,
    Loading,
    SelectingAssessment,
    CollectingIdentity(IdentityField),
    Downloading,
    Running,
    Paused,
    Overview,
    Submitting,
    ShowingResult,
    Review,
    Done,
    EmptyError(ContentError),
    Closed(SessionExit),
}

impl SessionState {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PauseItem {
    Resume,
    ViewAll,
    Submit,
    Exit,
}

impl PauseItem {
    pub const COUNT: usize = 4;
    pub const ALL: [PauseItem; Self::COUNT] =
        [Self::Resume, Self::ViewAll, Self::Submit, Self::Exit];
    const LABELS: [&'static str; Self::COUNT] = ["Resume", "View All", "Submit", "Exit"];

    pub const fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Resume => 0,
            Self::ViewAll => 1,
            Self::Submit => 2,
            Self::Exit => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Resume,
            1 => Self::ViewAll,
            2 => Self::Submit,
            _ => Self::Exit,
        }
    }
}

/// Events decoded from one [`InputFrame`].
#[derive(Clone, Copy, Debug, Default)]
struct FrameEvents {
    buttons: [Option<EdgeEvent>; Button::COUNT],
    key: Option<Key>,
    /// Raw dial sample when the dial moved past the hysteresis band.
    dial: Option<u16>,
}

impl FrameEvents {
    fn pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].is_some_and(EdgeEvent::is_pressed)
    }

    fn short_release(&self, button: Button) -> bool {
        self.buttons[button.index()].is_some_and(EdgeEvent::is_short_release)
    }

    fn long_press(&self, button: Button) -> bool {
        self.buttons[button.index()].is_some_and(EdgeEvent::is_long_press)
    }

    fn key_is(&self, key: Key) -> bool {
        self.key == Some(key)
    }

    /// A or Enter.
    fn accept(&self) -> bool {
        self.pressed(Button::A) || self.key_is(Key::Enter)
    }

    /// B or Escape.
    fn back(&self) -> bool {
        self.pressed(Button::B) || self.key_is(Key::Escape)
    }

    /// C or Up.
    fn up(&self) -> bool {
        self.pressed(Button::C) || self.key_is(Key::Up)
    }

    /// D or Down.
    fn down(&self) -> bool {
        self.pressed(Button::D) || self.key_is(Key::Down)
    }
}

#[derive(Clone, Debug, Default)]
struct Identity {
    name: heapless::String<IDENTITY_BYTES>,
    student_id: heapless::String<IDENTITY_BYTES>,
}

impl Identity {
    fn field(&self, field: IdentityField) -> &heapless::String<IDENTITY_BYTES> {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::StudentId => &self.student_id,
        }
    }

    fn field_mut(&mut self, field: IdentityField) -> &mut heapless::String<IDENTITY_BYTES> {
        match field {
            IdentityField::Name => &mut self.name,
            IdentityField::StudentId => &mut self.student_id,
        }
    }
}

pub struct SessionEngine<K, C, F>
where
    K: AssessmentKind,
    C: ContentSource,
    F: Feedback,
{
    content: C,
    feedback: F,
    config: SessionConfig,
    state: SessionState,
    pending_redraw: bool,
    buttons: [EdgeDetector; Button::COUNT],
    dial_mapper: DialMapper,
    dial: DialTracker,
    catalog: Vec<AssessmentSummary>,
    list_cursor: OverviewCursor,
    identity: Identity,
    assessment: Option<Assessment<K::Key>>,
    slots: Vec<AnswerSlot<K::Answer>>,
    current: usize,
    draft: heapless::String<ANSWER_BYTES>,
    sheet_cursor: OverviewCursor,
    pause_cursor: usize,
    review_index: usize,
    clock: SessionClock,
    warnings: WarningLatch,
    outcome: Option<Outcome>,
    request_started_ms: Option<u64>,
    last_remaining_secs: Option<u32>,
    last_blink_slot: Option<u64>,
    _kind: PhantomData<K>,
}

pub type ExamSession<C, F> = SessionEngine<Exam, C, F>;
pub type QuizSession<C, F> = SessionEngine<Quiz, C, F>;

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
include!("navigation.rs");
