//! XP curves and feature unlock rules.
//!
//! Hero levels follow `floor(50 * level^1.8)` per level (100 levels), the
//! account follows `floor(200 * level^2)` (60 levels). Each entry is the XP
//! needed to go from that level to the next.

/// Per-level XP requirements for a levelling track.
#[derive(Debug, Clone, PartialEq)]
pub struct XpCurve {
    requirements: Vec<u64>,
}

impl XpCurve {
    /// Build a curve of `levels` entries from a requirement function of the
    /// 1-based level.
    pub fn from_fn(levels: u32, f: impl Fn(u32) -> f64) -> Self {
        let requirements = (1..=levels).map(|l| f(l).floor() as u64).collect();
        Self { requirements }
    }

    /// The hero levelling curve.
    pub fn hero() -> Self {
        Self::from_fn(100, |l| 50.0 * f64::from(l).powf(1.8))
    }

    /// The account levelling curve.
    pub fn account() -> Self {
        Self::from_fn(60, |l| 200.0 * f64::from(l).powi(2))
    }

    /// XP required at `level` (1-based), or `None` outside the curve.
    pub fn required(&self, level: u32) -> Option<u64> {
        let idx = level.checked_sub(1)? as usize;
        self.requirements.get(idx).copied()
    }

    /// Highest reachable level.
    pub fn max_level(&self) -> u32 {
        self.requirements.len() as u32
    }

    /// Level reached after earning `total_xp` from level 1, capped at
    /// [`max_level`](Self::max_level).
    pub fn level_for_xp(&self, total_xp: u64) -> u32 {
        let mut remaining = total_xp;
        let mut level = 1;
        for req in &self.requirements {
            if level >= self.max_level() || remaining < *req {
                break;
            }
            remaining -= req;
            level += 1;
        }
        level
    }
}

/// Player facts an unlock rule is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockContext {
    /// Current account level.
    pub account_level: u32,
    /// Number of stages cleared so far.
    pub stages_cleared: u32,
}

/// A feature gate.
#[derive(Debug, Clone, Copy)]
pub struct UnlockRule {
    /// Rule identifier.
    pub id: &'static str,
    /// Player-facing description.
    pub description: &'static str,
    /// Returns `true` once the feature is unlocked.
    pub condition: fn(&UnlockContext) -> bool,
}

impl UnlockRule {
    /// Evaluate the rule.
    pub fn is_met(&self, ctx: &UnlockContext) -> bool {
        (self.condition)(ctx)
    }
}

/// The built-in unlock rules.
pub const UNLOCK_RULES: &[UnlockRule] = &[
    UnlockRule {
        id: "unlock-desert",
        description: "Unlock the Desert biome at account level 10.",
        condition: |ctx| ctx.account_level >= 10,
    },
    UnlockRule {
        id: "unlock-talents",
        description: "Unlock talent trees after clearing stage 1-5.",
        condition: |ctx| ctx.stages_cleared >= 5,
    },
];

/// IDs of the built-in rules satisfied by `ctx`.
pub fn unlocked(ctx: &UnlockContext) -> Vec<&'static str> {
    UNLOCK_RULES
        .iter()
        .filter(|r| r.is_met(ctx))
        .map(|r| r.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_curve_values() {
        let curve = XpCurve::hero();
        assert_eq!(curve.max_level(), 100);
        assert_eq!(curve.required(1), Some(50));
        // 50 * 2^1.8 = 174.11
        assert_eq!(curve.required(2), Some(174));
        assert_eq!(curve.required(0), None);
        assert_eq!(curve.required(101), None);
    }

    #[test]
    fn account_curve_values() {
        let curve = XpCurve::account();
        assert_eq!(curve.max_level(), 60);
        assert_eq!(curve.required(1), Some(200));
        assert_eq!(curve.required(10), Some(20_000));
    }

    #[test]
    fn level_for_xp_walks_cumulative_requirements() {
        let curve = XpCurve::account();
        assert_eq!(curve.level_for_xp(0), 1);
        assert_eq!(curve.level_for_xp(199), 1);
        assert_eq!(curve.level_for_xp(200), 2);
        // 200 + 800 = 1000 to reach level 3
        assert_eq!(curve.level_for_xp(999), 2);
        assert_eq!(curve.level_for_xp(1000), 3);
        assert_eq!(curve.level_for_xp(u64::MAX), 60);
    }

    #[test]
    fn unlock_rules_gate_on_context() {
        assert!(unlocked(&UnlockContext::default()).is_empty());

        let ctx = UnlockContext {
            account_level: 10,
            stages_cleared: 4,
        };
        assert_eq!(unlocked(&ctx), vec!["unlock-desert"]);

        let ctx = UnlockContext {
            account_level: 3,
            stages_cleared: 5,
        };
        assert_eq!(unlocked(&ctx), vec!["unlock-talents"]);
    }
}
