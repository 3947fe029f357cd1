//! Session time accounting across pause/resume cycles.

use heapless::Vec;

/// Elapsed/remaining time bookkeeping for one running assessment.
///
/// All instants are caller-supplied millisecond timestamps from a monotonic
/// source. Paused intervals are folded into `accumulated_pause_ms` on resume,
/// so `elapsed_ms` excludes every pause regardless of how many cycles occur.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SessionClock {
    start_ms: u64,
    accumulated_pause_ms: u64,
    pause_start_ms: Option<u64>,
}

impl SessionClock {
    pub const fn new() -> Self {
        Self {
            start_ms: 0,
            accumulated_pause_ms: 0,
            pause_start_ms: None,
        }
    }

    /// Reset and start counting from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        *self = Self {
            start_ms: now_ms,
            accumulated_pause_ms: 0,
            pause_start_ms: None,
        };
    }

    /// Freeze elapsed time at `now_ms`. No-op when already paused.
    pub fn pause(&mut self, now_ms: u64) {
        if self.pause_start_ms.is_none() {
            self.pause_start_ms = Some(now_ms.max(self.start_ms));
        }
    }

    /// Fold the pending pause interval into the accumulated total.
    /// No-op when running.
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(pause_start) = self.pause_start_ms.take() {
            self.accumulated_pause_ms = self
                .accumulated_pause_ms
                .saturating_add(now_ms.saturating_sub(pause_start));
        }
    }

    pub const fn is_paused(&self) -> bool {
        self.pause_start_ms.is_some()
    }

    pub const fn accumulated_pause_ms(&self) -> u64 {
        self.accumulated_pause_ms
    }

    /// Time spent running. While paused this is frozen at the pause instant.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let reference = self.pause_start_ms.unwrap_or(now_ms);
        reference
            .saturating_sub(self.start_ms)
            .saturating_sub(self.accumulated_pause_ms)
    }

    /// Remaining time for a `total_ms` budget, floored at zero.
    pub fn remaining_ms(&self, now_ms: u64, total_ms: u64) -> u64 {
        total_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Remaining whole seconds, counting elapsed time in whole seconds.
    ///
    /// Reaches zero exactly when `elapsed_ms >= total_secs * 1000`.
    pub fn remaining_secs(&self, now_ms: u64, total_secs: u32) -> u32 {
        let elapsed_secs = self.elapsed_ms(now_ms) / 1_000;
        (total_secs as u64).saturating_sub(elapsed_secs) as u32
    }
}

/// One of the two one-shot countdown warnings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimeWarning {
    /// First threshold (one minute by default).
    Early,
    /// Second threshold (thirty seconds by default).
    Final,
}

/// Fires each warning exactly once per session.
///
/// Only [`WarningLatch::reset`] re-arms the warnings; pausing and resuming
/// does not.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WarningLatch {
    early_secs: u32,
    final_secs: u32,
    early_fired: bool,
    final_fired: bool,
}

impl WarningLatch {
    pub const fn new(early_secs: u32, final_secs: u32) -> Self {
        Self {
            early_secs,
            final_secs,
            early_fired: false,
            final_fired: false,
        }
    }

    pub fn reset(&mut self) {
        self.early_fired = false;
        self.final_fired = false;
    }

    pub const fn early_fired(&self) -> bool {
        self.early_fired
    }

    pub const fn final_fired(&self) -> bool {
        self.final_fired
    }

    /// Observe the current remaining seconds and return warnings crossing
    /// their threshold on this call, earliest first.
    pub fn observe(&mut self, remaining_secs: u32) -> Vec<TimeWarning, 2> {
        let mut fired = Vec::new();
        if !self.early_fired && remaining_secs <= self.early_secs {
            self.early_fired = true;
            let _ = fired.push(TimeWarning::Early);
        }
        if !self.final_fired && remaining_secs <= self.final_secs {
            self.final_fired = true;
            let _ = fired.push(TimeWarning::Final);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_excludes_every_pause_interval() {
        let mut clock = SessionClock::new();
        clock.start(1_000);

        clock.pause(3_000);
        clock.resume(8_000);
        clock.pause(10_000);
        clock.resume(10_500);
        clock.pause(12_000);
        clock.resume(22_000);

        // wall 24_000 - start 1_000 - pauses (5_000 + 500 + 10_000)
        assert_eq!(clock.elapsed_ms(24_000), 7_500);
        assert_eq!(clock.accumulated_pause_ms(), 15_500);
    }

    #[test]
    fn elapsed_is_frozen_while_paused() {
        let mut clock = SessionClock::new();
        clock.start(0);
        clock.pause(4_000);
        assert_eq!(clock.elapsed_ms(4_000), 4_000);
        assert_eq!(clock.elapsed_ms(60_000), 4_000);
        assert!(clock.is_paused());
    }

    #[test]
    fn double_pause_keeps_first_instant() {
        let mut clock = SessionClock::new();
        clock.start(0);
        clock.pause(2_000);
        clock.pause(5_000);
        clock.resume(6_000);
        assert_eq!(clock.elapsed_ms(7_000), 3_000);
    }

    #[test]
    fn resume_without_pause_is_noop() {
        let mut clock = SessionClock::new();
        clock.start(100);
        clock.resume(5_000);
        assert_eq!(clock.elapsed_ms(1_100), 1_000);
    }

    #[test]
    fn elapsed_never_decreases_while_running() {
        let mut clock = SessionClock::new();
        clock.start(0);
        let mut last = 0;
        let mut now = 0;
        for step in 0..200u64 {
            now += 7 + step % 13;
            if step % 17 == 5 {
                clock.pause(now);
                now += 250;
                clock.resume(now);
            }
            let elapsed = clock.elapsed_ms(now);
            assert!(elapsed >= last);
            last = elapsed;
        }
    }

    #[test]
    fn remaining_is_floored_at_zero() {
        let mut clock = SessionClock::new();
        clock.start(0);
        assert_eq!(clock.remaining_ms(5_000, 3_000), 0);
        assert_eq!(clock.remaining_secs(5_000, 3), 0);
        assert_eq!(clock.remaining_secs(2_999, 3), 1);
        assert_eq!(clock.remaining_secs(999, 3), 3);
    }

    #[test]
    fn warnings_fire_once_each() {
        let mut latch = WarningLatch::new(60, 30);
        assert!(latch.observe(61).is_empty());
        assert_eq!(latch.observe(60).as_slice(), &[TimeWarning::Early]);
        assert!(latch.observe(59).is_empty());
        assert!(latch.observe(31).is_empty());
        assert_eq!(latch.observe(30).as_slice(), &[TimeWarning::Final]);
        assert!(latch.observe(10).is_empty());
    }

    #[test]
    fn skipped_thresholds_fire_together_in_order() {
        let mut latch = WarningLatch::new(60, 30);
        assert_eq!(
            latch.observe(12).as_slice(),
            &[TimeWarning::Early, TimeWarning::Final]
        );
        latch.reset();
        assert!(!latch.early_fired());
        assert_eq!(latch.observe(45).as_slice(), &[TimeWarning::Early]);
    }

    #[test]
    fn ninety_second_countdown_with_irregular_ticks() {
        let mut clock = SessionClock::new();
        let mut latch = WarningLatch::new(60, 30);
        clock.start(0);

        let mut fired = std::vec::Vec::new();
        let mut now = 0;
        for step in [900u64, 1_700, 300, 2_300, 1_100].iter().cycle().take(120) {
            now += step;
            let remaining = clock.remaining_secs(now, 90);
            for warning in latch.observe(remaining) {
                fired.push((warning, remaining));
            }
        }

        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].0, TimeWarning::Early);
        assert!((58..=60).contains(&fired[0].1));
        assert_eq!(fired[1].0, TimeWarning::Final);
        assert!((28..=30).contains(&fired[1].1));
    }
}
