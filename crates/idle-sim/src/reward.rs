//! Stage reward calculation.

use idle_core::{ResourceBundle, ResourceType, Stage};
use serde::{Deserialize, Serialize};

/// Gold granted per point of essence.
pub const GOLD_PER_ESSENCE: u64 = 20;

/// Base reward for a stage of the given power:
/// `floor((100 + stage_power * 2) * bonus_multiplier)`.
///
/// Negative or non-finite results clamp to 0.
pub fn stage_reward(stage_power: f64, bonus_multiplier: f64) -> u64 {
    let value = ((100.0 + stage_power * 2.0) * bonus_multiplier).floor();
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

/// The resources granted for clearing `stage`: gold from
/// [`stage_reward`] and one essence per [`GOLD_PER_ESSENCE`] gold.
pub fn reward_bundle(stage: &Stage, bonus_multiplier: f64) -> ResourceBundle {
    let gold = stage_reward(f64::from(stage.recommended_power), bonus_multiplier);
    ResourceBundle::new()
        .with(ResourceType::Gold, gold)
        .with(ResourceType::Essence, gold / GOLD_PER_ESSENCE)
}

/// Terminal output of a stage run, produced once per completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    /// Whether the stage was won.
    pub victory: bool,
    /// Resources granted.
    pub rewards: ResourceBundle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_core::EnemyTemplate;

    #[test]
    fn reward_formula_reference_values() {
        assert_eq!(stage_reward(0.0, 1.0), 100);
        assert_eq!(stage_reward(190.0, 1.0), 480);
        assert_eq!(stage_reward(100.0, 2.0), 600);
    }

    #[test]
    fn reward_floors_fractional_results() {
        // (100 + 2*10) * 1.25 = 150; (100 + 2*1) * 1.5 = 153
        assert_eq!(stage_reward(10.0, 1.25), 150);
        assert_eq!(stage_reward(1.0, 1.5), 153);
        assert_eq!(stage_reward(0.0, 0.999), 99);
    }

    #[test]
    fn reward_clamps_degenerate_inputs() {
        assert_eq!(stage_reward(-100.0, 1.0), 0);
        assert_eq!(stage_reward(0.0, 0.0), 0);
        assert_eq!(stage_reward(f64::NAN, 1.0), 0);
    }

    #[test]
    fn bundle_grants_gold_and_essence() {
        let stage = Stage::new(
            "grasslands-1",
            "Whispering Plains",
            vec![EnemyTemplate::new("slime", "Azure Slime", 1)],
            10,
        );
        let bundle = reward_bundle(&stage, 1.0);
        assert_eq!(bundle.get(ResourceType::Gold), 120);
        assert_eq!(bundle.get(ResourceType::Essence), 6);
    }
}
