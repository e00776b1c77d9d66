/// Tracks simulated time: a monotonic tick counter and the fixed tick length.
///
/// The clock never reads wall-clock time. Event timestamps are derived from
/// the number of executed ticks, so identical inputs produce identical
/// timestamps.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    tick_interval_ms: u32,
}

impl SimClock {
    /// Create a new clock at tick 0.
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            tick: 0,
            tick_interval_ms,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Number of ticks executed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated milliseconds elapsed since the clock was created.
    pub fn elapsed_ms(&self) -> u64 {
        self.tick * u64::from(self.tick_interval_ms)
    }

    /// The configured tick length.
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }
}
