//! Offline catch-up planning.
//!
//! Time spent away is clamped to the configured cap and cut into slices of
//! one tick interval; each slice simulates `ticks_per_slice` ticks. The plan
//! depends only on the elapsed time and the configuration, so the worst-case
//! work is bounded no matter how stale the host's timestamp is.

use serde::{Deserialize, Serialize};

use crate::accumulator::sanitize_elapsed;
use crate::config::EngineConfig;

/// How an offline request will be simulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfflinePlan {
    /// Elapsed time the host asked for, after clamping negatives to zero.
    pub requested_ms: f64,
    /// Elapsed time actually credited.
    pub clamped_ms: f64,
    /// Number of slices to run.
    pub slices: u64,
    /// Whether the request exceeded the cap.
    pub capped: bool,
}

impl OfflinePlan {
    /// Compute the plan for `elapsed_ms` under `config`.
    ///
    /// Negative and NaN requests plan nothing. An infinite request is
    /// credited up to the cap like any other oversized one.
    pub fn new(elapsed_ms: f64, config: &EngineConfig) -> Self {
        let requested_ms = if elapsed_ms == f64::INFINITY {
            elapsed_ms
        } else {
            sanitize_elapsed(elapsed_ms)
        };
        let cap_ms = config.offline_cap_ms();
        let clamped_ms = requested_ms.min(cap_ms);
        let slices = (clamped_ms / config.tick_interval()).floor() as u64;
        Self {
            requested_ms,
            clamped_ms,
            slices,
            capped: requested_ms > cap_ms,
        }
    }

    /// Ticks the plan accounts for: `slices * ticks_per_slice`.
    pub fn simulated_ticks(&self, config: &EngineConfig) -> u64 {
        self.slices
            .saturating_mul(u64::from(config.ticks_per_slice))
    }
}

/// Summary of an offline catch-up run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfflineReport {
    /// Ticks credited for the offline period (`slices * ticks_per_slice`).
    pub simulated_ticks: u64,
    /// Ticks actually executed. Lower than `simulated_ticks` when the stage
    /// completed or the engine was stopped.
    pub executed_ticks: u64,
    /// Elapsed time the host asked for.
    pub requested_ms: f64,
    /// Elapsed time credited after the cap.
    pub clamped_ms: f64,
    /// Whether the request exceeded the cap.
    pub capped: bool,
    /// Whether the stage completed during catch-up.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_within_cap() {
        let config = EngineConfig::default()
            .with_tick_interval_ms(1000)
            .with_offline_cap_hours(1.0);
        let plan = OfflinePlan::new(90_500.0, &config);
        assert_eq!(plan.slices, 90);
        assert!(!plan.capped);
        assert_eq!(plan.simulated_ticks(&config), 90);
    }

    #[test]
    fn plan_clamps_to_cap() {
        let config = EngineConfig::default()
            .with_tick_interval_ms(1000)
            .with_offline_cap_hours(1.0);
        let two_hours = OfflinePlan::new(7_200_000.0, &config);
        let one_hour = OfflinePlan::new(3_600_000.0, &config);
        assert!(two_hours.capped);
        assert!(!one_hour.capped);
        assert_eq!(two_hours.slices, 3600);
        assert_eq!(two_hours.slices, one_hour.slices);
        assert_eq!(two_hours.clamped_ms, 3_600_000.0);
    }

    #[test]
    fn ticks_per_slice_multiplies() {
        let config = EngineConfig::default()
            .with_tick_interval_ms(500)
            .with_ticks_per_slice(4);
        let plan = OfflinePlan::new(10_000.0, &config);
        assert_eq!(plan.slices, 20);
        assert_eq!(plan.simulated_ticks(&config), 80);
    }

    #[test]
    fn negative_elapsed_plans_nothing() {
        let config = EngineConfig::default();
        let plan = OfflinePlan::new(-5_000.0, &config);
        assert_eq!(plan.slices, 0);
        assert_eq!(plan.requested_ms, 0.0);
        assert!(!plan.capped);
    }

    #[test]
    fn zero_cap_credits_nothing() {
        let config = EngineConfig::default().with_offline_cap_hours(0.0);
        let plan = OfflinePlan::new(60_000.0, &config);
        assert_eq!(plan.slices, 0);
        assert!(plan.capped);
    }

    #[test]
    fn infinite_elapsed_is_capped() {
        let config = EngineConfig::default()
            .with_tick_interval_ms(1000)
            .with_offline_cap_hours(1.0);
        let plan = OfflinePlan::new(f64::INFINITY, &config);
        assert!(plan.capped);
        assert_eq!(plan.clamped_ms, config.offline_cap_ms());
        assert_eq!(plan.slices, 3600);
        assert_eq!(plan.slices, OfflinePlan::new(f64::MAX, &config).slices);
    }

    #[test]
    fn nan_elapsed_plans_nothing() {
        let config = EngineConfig::default();
        let plan = OfflinePlan::new(f64::NAN, &config);
        assert_eq!(plan.slices, 0);
        assert!(!plan.capped);
    }
}
