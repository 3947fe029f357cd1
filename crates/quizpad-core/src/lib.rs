//! Timed assessment session engine for the quizpad handheld.
//!
//! The crate is `no_std` + `alloc`. Board code samples the buttons, dial and
//! keyboard once per loop iteration into an [`input::InputFrame`], hands it to
//! [`session::SessionEngine::tick`], and renders the resulting
//! [`render::Screen`] whenever a redraw is requested.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod answer;
pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod feedback;
pub mod input;
pub mod kind;
pub mod model;
pub mod overview;
pub mod render;
pub mod score;
pub mod session;

pub use session::{ExamSession, QuizSession, SessionEngine, SessionExit, SessionState, TickResult};
