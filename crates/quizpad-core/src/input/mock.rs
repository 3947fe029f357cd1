use super::{InputFrame, InputProvider};

/// No-hardware input source used during bring-up: nothing pressed, dial at rest.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput {
    dial: u16,
}

impl MockInput {
    pub const fn new() -> Self {
        Self { dial: 0 }
    }

    pub const fn with_dial(dial: u16) -> Self {
        Self { dial }
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn sample(&mut self) -> Result<InputFrame, Self::Error> {
        Ok(InputFrame::idle(self.dial))
    }
}
