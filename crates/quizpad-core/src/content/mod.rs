//! Remote content collaborator.
//!
//! Transport is owned by the board: the engine only issues a [`Request`] and
//! polls for its [`Response`] on later ticks, so a slow network never blocks
//! the loop.

use alloc::vec::Vec;

pub mod static_source;
pub mod wire;

/// HTTP-style request issued by the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Request<'a> {
    Get { path: &'a str },
    Post { path: &'a str, body: &'a [u8] },
}

impl<'a> Request<'a> {
    pub const fn path(&self) -> &'a str {
        match *self {
            Self::Get { path } | Self::Post { path, .. } => path,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn with_status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// 200 and 201 are the only statuses the backend uses for success.
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// Poll result for the in-flight request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fetch<T> {
    Pending,
    Ready(T),
}

/// Non-blocking request/response transport to the study backend.
///
/// At most one request is in flight; `begin` replaces any previous one.
pub trait ContentSource {
    type Error: core::fmt::Debug;

    /// Start a request. Must not block.
    fn begin(&mut self, request: Request<'_>) -> Result<(), Self::Error>;

    /// Poll the in-flight request. Returns `Ready` exactly once per request.
    fn poll(&mut self) -> Fetch<Result<Response, Self::Error>>;

    /// Abandon the in-flight request, if any.
    fn cancel(&mut self) {}
}

impl<T: ContentSource + ?Sized> ContentSource for &mut T {
    type Error = T::Error;

    fn begin(&mut self, request: Request<'_>) -> Result<(), Self::Error> {
        (**self).begin(request)
    }

    fn poll(&mut self) -> Fetch<Result<Response, Self::Error>> {
        (**self).poll()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}
