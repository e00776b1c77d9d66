use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{EnemyId, StageId};

/// An enemy definition. Each wave of a stage is led by one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    /// Enemy identifier, used as the target of combat events.
    pub id: EnemyId,
    /// Display name.
    pub name: String,
    /// Enemy level.
    pub level: u32,
    /// Raw stat block (`hp`, `atk`, `def`, ...).
    #[serde(default)]
    pub base_stats: BTreeMap<String, u32>,
    /// Free-form tags (`boss`, `slime`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EnemyTemplate {
    /// Create a template with no stats or tags.
    pub fn new(id: impl Into<EnemyId>, name: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            base_stats: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Add a stat value.
    pub fn with_stat(mut self, stat: impl Into<String>, value: u32) -> Self {
        self.base_stats.insert(stat.into(), value);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Look up a stat by name.
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.base_stats.get(name).copied()
    }
}

/// One weighted line of a drop table. Resolution into items happens outside
/// the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTableEntry {
    /// Item catalog identifier.
    pub item_id: String,
    /// Relative weight.
    pub weight: u32,
    /// Minimum quantity dropped.
    pub min_quantity: u32,
    /// Maximum quantity dropped.
    pub max_quantity: u32,
}

/// An ordered sequence of waves culminating in a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Stage identifier.
    pub id: StageId,
    /// Display name.
    pub name: String,
    /// Waves in the order they must be cleared.
    #[serde(alias = "enemies")]
    pub waves: Vec<EnemyTemplate>,
    /// Loot lines for this stage.
    #[serde(default)]
    pub drop_table: Vec<DropTableEntry>,
    /// The stage power used by the reward calculator.
    pub recommended_power: u32,
    /// Whether this stage is a boss encounter.
    #[serde(default)]
    pub is_boss: bool,
    /// Whether this stage can be replayed for resources.
    #[serde(default)]
    pub is_farmable: bool,
}

impl Stage {
    /// Create a stage with the given waves and power.
    pub fn new(
        id: impl Into<StageId>,
        name: impl Into<String>,
        waves: Vec<EnemyTemplate>,
        recommended_power: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            waves,
            drop_table: Vec::new(),
            recommended_power,
            is_boss: false,
            is_farmable: false,
        }
    }

    /// Mark the stage as a boss encounter.
    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    /// Mark the stage as farmable.
    pub fn farmable(mut self) -> Self {
        self.is_farmable = true;
        self
    }

    /// The wave at `index`, or `None` past the last wave.
    pub fn wave(&self, index: usize) -> Option<&EnemyTemplate> {
        self.waves.get(index)
    }

    /// Number of waves in the stage.
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }
}
