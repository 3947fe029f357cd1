//! Recoverable failure taxonomy.
//!
//! Nothing here is fatal: content failures surface as the session's error
//! screen and submission failures are only logged.

use core::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentError {
    /// Empty catalog, transport failure, non-success status or timeout.
    Unavailable,
    /// Response body did not match the expected JSON shape.
    Parse,
    /// Assessment parsed but has no questions.
    EmptyAssessment,
    /// Result upload failed; never shown as an error screen.
    SubmissionFailed,
}

impl ContentError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unavailable => "No content available",
            Self::Parse => "Parse error",
            Self::EmptyAssessment => "No questions",
            Self::SubmissionFailed => "Upload failed",
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}
