use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Numeric configuration for one engine. Immutable once handed to
/// [`Engine::new`](crate::Engine::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duration of one simulation tick in milliseconds.
    pub tick_interval_ms: u32,
    /// Maximum offline time credited by catch-up, in hours.
    pub offline_cap_hours: f64,
    /// Ticks simulated per offline slice (and the real-time speed-up of
    /// frame-driven advancing).
    pub ticks_per_slice: u32,
    /// Seed for the bundled random resolver.
    pub seed: u64,
    /// Bonus multiplier applied by the reward calculator.
    pub reward_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            offline_cap_hours: 8.0,
            ticks_per_slice: 1,
            seed: 42,
            reward_multiplier: 1.0,
        }
    }
}

impl EngineConfig {
    /// Set the tick interval in milliseconds.
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the offline catch-up cap in hours.
    pub fn with_offline_cap_hours(mut self, hours: f64) -> Self {
        self.offline_cap_hours = hours;
        self
    }

    /// Set the number of ticks per offline slice.
    pub fn with_ticks_per_slice(mut self, ticks: u32) -> Self {
        self.ticks_per_slice = ticks;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reward bonus multiplier.
    pub fn with_reward_multiplier(mut self, multiplier: f64) -> Self {
        self.reward_multiplier = multiplier;
        self
    }

    /// The tick interval as floating-point milliseconds.
    pub fn tick_interval(&self) -> f64 {
        f64::from(self.tick_interval_ms)
    }

    /// The offline cap in milliseconds.
    pub fn offline_cap_ms(&self) -> f64 {
        self.offline_cap_hours * MS_PER_HOUR
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(SimError::InvalidTickInterval(self.tick_interval_ms));
        }
        if !self.offline_cap_hours.is_finite() || self.offline_cap_hours < 0.0 {
            return Err(SimError::InvalidOfflineCap(self.offline_cap_hours));
        }
        if self.ticks_per_slice < 1 {
            return Err(SimError::InvalidTicksPerSlice(self.ticks_per_slice));
        }
        if !self.reward_multiplier.is_finite() || self.reward_multiplier < 0.0 {
            return Err(SimError::InvalidRewardMultiplier(self.reward_multiplier));
        }
        Ok(())
    }
}
