use idle_core::{EnemyTemplate, Formation, Stage};

/// Read-only view of the current tick handed to a resolver.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Tick being resolved (1-based).
    pub tick: u64,
    /// Simulated time at this tick, in milliseconds.
    pub timestamp_ms: u64,
    /// Index of the active wave.
    pub wave_index: usize,
    /// The active wave's lead enemy.
    pub wave: &'a EnemyTemplate,
    /// The player's formation.
    pub formation: &'a Formation,
    /// The stage being fought.
    pub stage: &'a Stage,
}

impl TickContext<'_> {
    /// Returns `true` when the active wave is the stage's last.
    pub fn is_final_wave(&self) -> bool {
        self.wave_index + 1 == self.stage.wave_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_wave_is_the_last_index() {
        let stage = Stage::new(
            "two-waves",
            "Two Waves",
            vec![
                EnemyTemplate::new("slime", "Azure Slime", 1),
                EnemyTemplate::new("oak-sentinel", "Oak Sentinel", 5),
            ],
            100,
        );
        let formation = Formation::default();
        let ctx = |wave_index: usize| TickContext {
            tick: 1,
            timestamp_ms: 1000,
            wave_index,
            wave: &stage.waves[wave_index],
            formation: &formation,
            stage: &stage,
        };

        assert!(!ctx(0).is_final_wave());
        assert!(ctx(1).is_final_wave());
    }
}
