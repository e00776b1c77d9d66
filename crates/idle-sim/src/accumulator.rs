//! Fixed-timestep accumulator.
//!
//! Converts irregular real-time deltas into whole simulation ticks, carrying
//! the unconsumed remainder forward. Between calls the remainder is always in
//! `[0, interval)`.

use tracing::debug;

const MICROS_PER_MS: f64 = 1000.0;

/// Carried remainder of real time not yet turned into ticks.
///
/// Time is held in whole microseconds so that many fractional frame deltas
/// sum exactly. Each delta is rounded to the nearest microsecond.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    interval_ms: u32,
    interval_us: u64,
    accumulated_us: u64,
}

impl TickAccumulator {
    /// Create an empty accumulator for the given tick length.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            interval_us: u64::from(interval_ms) * 1000,
            accumulated_us: 0,
        }
    }

    /// Add elapsed real time. Negative, NaN, and infinite deltas count as
    /// zero. Returns the amount actually added.
    pub fn add(&mut self, elapsed_ms: f64) -> f64 {
        let added = sanitize_elapsed(elapsed_ms);
        let micros = (added * MICROS_PER_MS).round() as u64;
        self.accumulated_us = self.accumulated_us.saturating_add(micros);
        added
    }

    /// Consume one tick's worth of time if available.
    pub fn try_consume(&mut self) -> bool {
        if self.interval_us > 0 && self.accumulated_us >= self.interval_us {
            self.accumulated_us -= self.interval_us;
            true
        } else {
            false
        }
    }

    /// Whole ticks currently waiting to be consumed.
    pub fn pending_ticks(&self) -> u64 {
        self.accumulated_us
            .checked_div(self.interval_us)
            .unwrap_or(0)
    }

    /// Discard all carried time.
    pub fn reset(&mut self) {
        self.accumulated_us = 0;
    }

    /// Carried time in milliseconds.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_us as f64 / MICROS_PER_MS
    }

    /// Tick length in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// Clamp a driver-supplied delta to a usable value: stale or misordered
/// timers must not crash or rewind the loop.
pub fn sanitize_elapsed(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms
    } else {
        if elapsed_ms != 0.0 {
            debug!(elapsed_ms, "ignoring unusable elapsed time");
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_whole_ticks_and_keeps_remainder() {
        let mut acc = TickAccumulator::new(1000);
        acc.add(2500.0);
        assert_eq!(acc.pending_ticks(), 2);

        let mut ticks = 0;
        while acc.try_consume() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);
        assert!((acc.accumulated_ms() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remainder_carries_across_calls() {
        let mut acc = TickAccumulator::new(1000);
        acc.add(600.0);
        assert!(!acc.try_consume());
        acc.add(600.0);
        assert!(acc.try_consume());
        assert!((acc.accumulated_ms() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_and_non_finite_are_zero() {
        let mut acc = TickAccumulator::new(100);
        assert_eq!(acc.add(-50.0), 0.0);
        assert_eq!(acc.add(f64::NAN), 0.0);
        assert_eq!(acc.add(f64::INFINITY), 0.0);
        assert_eq!(acc.accumulated_ms(), 0.0);
    }

    #[test]
    fn reset_discards_time() {
        let mut acc = TickAccumulator::new(100);
        acc.add(350.0);
        acc.reset();
        assert_eq!(acc.pending_ticks(), 0);
        assert_eq!(acc.accumulated_ms(), 0.0);
    }

    #[test]
    fn fractional_deltas_sum_exactly() {
        let mut acc = TickAccumulator::new(1);
        for _ in 0..10 {
            acc.add(0.1);
        }
        assert!(acc.try_consume());
        assert_eq!(acc.accumulated_ms(), 0.0);

        let mut frames = TickAccumulator::new(7);
        for _ in 0..10 {
            frames.add(0.7);
        }
        assert_eq!(frames.pending_ticks(), 1);
        assert_eq!(frames.interval_ms(), 7);
    }

    #[test]
    fn zero_interval_never_ticks() {
        let mut acc = TickAccumulator::new(0);
        acc.add(500.0);
        assert!(!acc.try_consume());
        assert_eq!(acc.pending_ticks(), 0);
    }
}
