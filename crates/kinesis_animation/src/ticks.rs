//! Tick-driven animation sequences
//!
//! Frame-counted helpers for driving animations from a per-frame loop: hold
//! for a number of ticks, run an eased 0..1 progress over a number of ticks,
//! and chain those into a looping preview. Sequences are plain iterators, so
//! they compose with `chain`, `map` and friends.

use std::iter;

use crate::easing::Easing;

/// Linear interpolation from `start` to `finish` as `t` goes from 0 to 1
pub fn lerp(t: f64, start: f64, finish: f64) -> f64 {
    (finish - start) * t + start
}

/// Number of ticks in `secs` seconds at `fps`, rounded
pub fn seconds(secs: f64, fps: f64) -> usize {
    (secs * fps).round().max(0.0) as usize
}

/// Ticks `0..duration`, for holding or delaying
pub fn tick_count(duration: usize) -> std::ops::Range<usize> {
    0..duration
}

/// Eased progress over `duration` ticks.
///
/// Tick `i` yields `easing(i / (duration - 1))`, so the last tick lands on
/// `easing(1)`. A one-tick run yields `1.0` directly and an empty run
/// yields nothing.
pub fn eased_ticks(duration: usize, easing: Easing) -> EasedTicks {
    EasedTicks {
        easing,
        index: 0,
        duration,
    }
}

/// Iterator returned by [`eased_ticks`]
#[derive(Clone, Debug)]
pub struct EasedTicks {
    easing: Easing,
    index: usize,
    duration: usize,
}

impl Iterator for EasedTicks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.duration {
            return None;
        }
        let i = self.index;
        self.index += 1;

        if self.duration == 1 {
            return Some(1.0);
        }
        let last = (self.duration - 1) as f64;
        Some(self.easing.apply(i as f64 / last))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.duration - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EasedTicks {}

/// Endless back-and-forth preview of an easing, as positions in [0, 1].
///
/// Each cycle holds at 0 for `pause` ticks, eases to 1 over `travel` ticks,
/// holds at 1 for `pause` ticks, then eases back to 0. Curves that overshoot
/// will leave [0, 1] during travel.
///
/// Positions are computed as they are pulled, so long holds cost nothing up
/// front.
pub fn preview_cycle(
    pause: usize,
    travel: usize,
    easing: Easing,
) -> impl Iterator<Item = f64> + Clone {
    tracing::trace!(pause, travel, "built preview cycle");

    let forward = eased_ticks(travel, easing.clone());
    let backward = eased_ticks(travel, easing).map(|t| lerp(t, 1.0, 0.0));

    iter::repeat(0.0)
        .take(pause)
        .chain(forward)
        .chain(iter::repeat(1.0).take(pause))
        .chain(backward)
        .cycle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 20.0), 10.0);
        assert_eq!(lerp(1.0, 10.0, 20.0), 20.0);
        assert_eq!(lerp(0.25, 10.0, 20.0), 12.5);
        // Overshooting eases extrapolate
        assert_eq!(lerp(1.5, 0.0, 2.0), 3.0);
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(1.0, 60.0), 60);
        assert_eq!(seconds(0.5, 60.0), 30);
        assert_eq!(seconds(0.5, 25.0), 13);
    }

    #[test]
    fn test_tick_count() {
        assert_eq!(tick_count(3).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tick_count(0).count(), 0);
    }

    #[test]
    fn test_single_tick_yields_one() {
        // The curve is not consulted for a one-tick run
        let ticks: Vec<f64> = eased_ticks(1, Easing::Flip).collect();
        assert_eq!(ticks, vec![1.0]);
    }

    #[test]
    fn test_empty_run() {
        assert_eq!(eased_ticks(0, Easing::Linear).count(), 0);
    }

    #[test]
    fn test_linear_ticks() {
        let ticks: Vec<f64> = eased_ticks(5, Easing::Linear).collect();
        assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_eased_ticks_endpoints() {
        let easing = Easing::cubic_bezier(0.31, 0.52, 0.70, 0.95);
        let ticks = eased_ticks(60, easing);
        assert_eq!(ticks.len(), 60);
        let ticks: Vec<f64> = ticks.collect();
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[59], 1.0);
    }

    #[test]
    fn test_preview_cycle_shape() {
        let period = 2 * 3 + 2 * 5;
        let positions: Vec<f64> = preview_cycle(3, 5, Easing::Linear)
            .take(period * 2)
            .collect();

        assert_eq!(&positions[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&positions[3..8], &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(&positions[8..11], &[1.0, 1.0, 1.0]);
        assert_eq!(&positions[11..16], &[1.0, 0.75, 0.5, 0.25, 0.0]);
        // Loops
        assert_eq!(&positions[..period], &positions[period..]);
    }

    #[test]
    fn test_preview_cycle_long_hold_is_lazy() {
        let positions: Vec<f64> = preview_cycle(usize::MAX, 0, Easing::Linear)
            .take(3)
            .collect();
        assert_eq!(positions, vec![0.0, 0.0, 0.0]);

        let hold = seconds(0.5, 1e300);
        assert_eq!(hold, usize::MAX);
        assert_eq!(preview_cycle(hold, hold, Easing::Linear).nth(10), Some(0.0));
    }

    #[test]
    fn test_preview_cycle_empty() {
        assert_eq!(preview_cycle(0, 0, Easing::Linear).next(), None);
    }
}
