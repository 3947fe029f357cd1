//! Polled boolean channel to discrete press/release/long-press events.

/// Discrete event produced from a sampled button level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeEvent {
    Pressed,
    /// Fired once per hold, the first sample at or past the long-press threshold.
    LongPressed { held_ms: u64 },
    /// `short` is set when the hold ended before the long-press threshold and
    /// no long press fired during it.
    Released { held_ms: u64, short: bool },
}

impl EdgeEvent {
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    pub const fn is_short_release(self) -> bool {
        matches!(self, Self::Released { short: true, .. })
    }

    pub const fn is_long_press(self) -> bool {
        matches!(self, Self::LongPressed { .. })
    }
}

/// Per-channel edge, debounce and long-press tracking.
///
/// Only accepted transitions change `stable`. A level change arriving inside
/// the debounce window is not dropped: it is re-evaluated on later samples and
/// accepted once the window has elapsed if the level still differs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EdgeDetector {
    debounce_ms: u16,
    long_press_ms: u16,
    stable: bool,
    last_transition_ms: Option<u64>,
    press_start_ms: u64,
    long_fired: bool,
}

impl EdgeDetector {
    pub const fn new(debounce_ms: u16, long_press_ms: u16) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            stable: false,
            last_transition_ms: None,
            press_start_ms: 0,
            long_fired: false,
        }
    }

    /// Detector that treats `pressed` as the already-settled level, so a
    /// button held while a screen opens does not fire on it.
    pub const fn settled(debounce_ms: u16, long_press_ms: u16, pressed: bool, now_ms: u64) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            stable: pressed,
            last_transition_ms: None,
            press_start_ms: now_ms,
            long_fired: pressed,
        }
    }

    pub const fn is_held(&self) -> bool {
        self.stable
    }

    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<EdgeEvent> {
        if pressed != self.stable {
            let debounced = self
                .last_transition_ms
                .is_none_or(|last| now_ms.saturating_sub(last) >= self.debounce_ms as u64);
            if !debounced {
                return None;
            }

            self.stable = pressed;
            self.last_transition_ms = Some(now_ms);

            if pressed {
                self.press_start_ms = now_ms;
                self.long_fired = false;
                return Some(EdgeEvent::Pressed);
            }

            let held_ms = now_ms.saturating_sub(self.press_start_ms);
            let short = !self.long_fired && held_ms < self.long_press_ms as u64;
            self.long_fired = false;
            return Some(EdgeEvent::Released { held_ms, short });
        }

        if self.stable && !self.long_fired {
            let held_ms = now_ms.saturating_sub(self.press_start_ms);
            if held_ms >= self.long_press_ms as u64 {
                self.long_fired = true;
                return Some(EdgeEvent::LongPressed { held_ms });
            }
        }

        None
    }
}
