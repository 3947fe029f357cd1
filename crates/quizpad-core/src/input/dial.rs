//! Potentiometer sample to list index mapping.

/// Full-scale value of the 12-bit dial ADC.
pub const DIAL_MAX: u16 = 4_095;
const DIAL_SPAN: u32 = DIAL_MAX as u32 + 1;

/// Maps a 0..=4095 sample onto `[0, item_count)`.
///
/// Samples inside the dead-zones snap to the ends of travel before scaling so
/// that the first and last items stay reachable on a worn pot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DialMapper {
    low_deadzone: u16,
    high_deadzone: u16,
}

impl Default for DialMapper {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_DIAL_LOW_DEADZONE,
            crate::config::DEFAULT_DIAL_HIGH_DEADZONE,
        )
    }
}

impl DialMapper {
    pub const fn new(low_deadzone: u16, high_deadzone: u16) -> Self {
        Self {
            low_deadzone,
            high_deadzone,
        }
    }

    pub fn map(&self, raw: u16, item_count: usize) -> usize {
        if item_count == 0 {
            return 0;
        }

        let raw = if raw < self.low_deadzone {
            0
        } else if raw > self.high_deadzone {
            DIAL_MAX
        } else {
            raw.min(DIAL_MAX)
        };

        let index = (raw as u64 * item_count as u64 / DIAL_SPAN as u64) as usize;
        index.min(item_count - 1)
    }
}

/// Change detector for the dial.
///
/// A resting pot jitters by a few LSBs; the tracker reports a new sample only
/// once it has moved more than `hysteresis` from the last reported one, so a
/// dial nobody touches never overrides button or keyboard navigation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DialTracker {
    hysteresis: u16,
    last_reported: Option<u16>,
}

impl DialTracker {
    pub const fn new(hysteresis: u16) -> Self {
        Self {
            hysteresis,
            last_reported: None,
        }
    }

    /// Returns `Some(raw)` when the dial has moved; the first sample only
    /// seeds the baseline.
    pub fn update(&mut self, raw: u16) -> Option<u16> {
        match self.last_reported {
            None => {
                self.last_reported = Some(raw);
                None
            }
            Some(last) if raw.abs_diff(last) > self.hysteresis => {
                self.last_reported = Some(raw);
                Some(raw)
            }
            Some(_) => None,
        }
    }

    pub fn rebase(&mut self, raw: u16) {
        self.last_reported = Some(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_map_to_first_and_last() {
        let dial = DialMapper::default();
        for n in 1..=20 {
            assert_eq!(dial.map(0, n), 0);
            assert_eq!(dial.map(4_095, n), n - 1);
        }
    }

    #[test]
    fn zero_items_map_to_zero() {
        let dial = DialMapper::default();
        for raw in [0, 1, 200, 2_048, 4_095] {
            assert_eq!(dial.map(raw, 0), 0);
        }
    }

    #[test]
    fn deadzones_snap_to_extremes() {
        let dial = DialMapper::default();
        for raw in (0..200).step_by(7) {
            assert_eq!(dial.map(raw, 7), 0);
        }
        for raw in 3_901..=4_095 {
            assert_eq!(dial.map(raw, 7), 6);
        }
    }

    #[test]
    fn midrange_scales_linearly() {
        let dial = DialMapper::default();
        assert_eq!(dial.map(2_048, 2), 1);
        assert_eq!(dial.map(2_047, 2), 0);
        assert_eq!(dial.map(1_024, 4), 1);
        assert_eq!(dial.map(3_072, 4), 3);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let dial = DialMapper::default();
        assert_eq!(dial.map(u16::MAX, 5), 4);
    }

    #[test]
    fn tracker_ignores_jitter() {
        let mut tracker = DialTracker::new(100);
        assert_eq!(tracker.update(1_000), None);
        assert_eq!(tracker.update(1_060), None);
        assert_eq!(tracker.update(940), None);
        assert_eq!(tracker.update(1_101), Some(1_101));
        assert_eq!(tracker.update(1_150), None);
        tracker.rebase(3_000);
        assert_eq!(tracker.update(2_950), None);
        assert_eq!(tracker.update(2_800), Some(2_800));
    }
}
