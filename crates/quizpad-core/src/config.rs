//! Timing and layout parameters for the session engine.
//!
//! Defaults match the handheld: PCF8575 buttons A-D, a 12-bit potentiometer
//! and a 5-row answer sheet on the TFT.

use crate::input::Button;

/// Debounce per button channel (A, B, C, D).
pub const DEFAULT_BUTTON_DEBOUNCE_MS: [u16; Button::COUNT] = [250, 250, 200, 200];

/// Hold time after which a button reports a long press.
pub const DEFAULT_LONG_PRESS_MS: u16 = 1_000;

/// Raw dial samples below this read as the bottom of travel.
pub const DEFAULT_DIAL_LOW_DEADZONE: u16 = 200;

/// Raw dial samples above this read as the top of travel.
pub const DEFAULT_DIAL_HIGH_DEADZONE: u16 = 3_900;

/// Minimum raw dial movement before a cursor follows the dial.
pub const DEFAULT_DIAL_HYSTERESIS: u16 = 100;

/// Answer-sheet rows visible at once.
pub const DEFAULT_OVERVIEW_ROWS: u8 = 5;

/// Upper bound for `overview_rows`; view buffers are sized to this.
pub const MAX_OVERVIEW_ROWS: usize = 8;

pub const DEFAULT_EARLY_WARNING_SECS: u32 = 60;
pub const DEFAULT_FINAL_WARNING_SECS: u32 = 30;

pub const DEFAULT_FETCH_TIMEOUT_MS: u32 = 10_000;
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u32 = 10_000;

/// Text-entry cursor blink half-period.
pub const DEFAULT_CURSOR_BLINK_MS: u16 = 500;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub button_debounce_ms: [u16; Button::COUNT],
    pub long_press_ms: u16,
    pub dial_low_deadzone: u16,
    pub dial_high_deadzone: u16,
    pub dial_hysteresis: u16,
    pub overview_rows: u8,
    pub early_warning_secs: u32,
    pub final_warning_secs: u32,
    pub fetch_timeout_ms: u32,
    pub submit_timeout_ms: u32,
    pub cursor_blink_ms: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            button_debounce_ms: DEFAULT_BUTTON_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            dial_low_deadzone: DEFAULT_DIAL_LOW_DEADZONE,
            dial_high_deadzone: DEFAULT_DIAL_HIGH_DEADZONE,
            dial_hysteresis: DEFAULT_DIAL_HYSTERESIS,
            overview_rows: DEFAULT_OVERVIEW_ROWS,
            early_warning_secs: DEFAULT_EARLY_WARNING_SECS,
            final_warning_secs: DEFAULT_FINAL_WARNING_SECS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            cursor_blink_ms: DEFAULT_CURSOR_BLINK_MS,
        }
    }
}

impl SessionConfig {
    pub const fn with_button_debounce_ms(mut self, button: Button, debounce_ms: u16) -> Self {
        self.button_debounce_ms[button.index()] = debounce_ms;
        self
    }

    pub const fn with_long_press_ms(mut self, long_press_ms: u16) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    pub const fn with_dial_deadzones(mut self, low: u16, high: u16) -> Self {
        self.dial_low_deadzone = low;
        self.dial_high_deadzone = high;
        self
    }

    pub const fn with_dial_hysteresis(mut self, dial_hysteresis: u16) -> Self {
        self.dial_hysteresis = dial_hysteresis;
        self
    }

    pub const fn with_overview_rows(mut self, overview_rows: u8) -> Self {
        self.overview_rows = overview_rows;
        self
    }

    pub const fn with_warning_secs(mut self, early: u32, final_secs: u32) -> Self {
        self.early_warning_secs = early;
        self.final_warning_secs = final_secs;
        self
    }

    pub const fn with_fetch_timeout_ms(mut self, fetch_timeout_ms: u32) -> Self {
        self.fetch_timeout_ms = fetch_timeout_ms;
        self
    }

    pub const fn with_submit_timeout_ms(mut self, submit_timeout_ms: u32) -> Self {
        self.submit_timeout_ms = submit_timeout_ms;
        self
    }

    /// Clamp values the engine cannot honour.
    pub(crate) fn sanitized(mut self) -> Self {
        self.overview_rows = self.overview_rows.clamp(1, MAX_OVERVIEW_ROWS as u8);
        if self.dial_high_deadzone < self.dial_low_deadzone {
            core::mem::swap(&mut self.dial_high_deadzone, &mut self.dial_low_deadzone);
        }
        if self.final_warning_secs > self.early_warning_secs {
            core::mem::swap(&mut self.final_warning_secs, &mut self.early_warning_secs);
        }
        self.long_press_ms = self.long_press_ms.max(1);
        self.cursor_blink_ms = self.cursor_blink_ms.max(1);
        self
    }
}
