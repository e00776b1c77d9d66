use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{LocationId, StageId};
use crate::stage::{DropTableEntry, EnemyTemplate, Stage};

/// Visual and thematic region of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    /// Starting region.
    Grasslands,
    /// Sand and ruins.
    Desert,
    /// Ice fields.
    Frost,
    /// Marshland.
    Swamp,
    /// Lava and ash.
    Volcano,
    /// End-game region.
    Void,
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Difficulty tier of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Base tier.
    Normal,
    /// Second tier.
    Hard,
    /// Third tier.
    Nightmare,
    /// Infinite scaling tier.
    Endless,
}

/// A condition that must hold before a location opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum UnlockRequirement {
    /// Minimum player level.
    PlayerLevel(u32),
    /// A quest that must be completed.
    Quest(String),
    /// A boss stage that must be cleared.
    Boss(String),
}

/// A biome at a difficulty, holding an ordered list of stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Location identifier.
    pub id: LocationId,
    /// Region this location belongs to.
    pub biome: Biome,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Stages in play order.
    pub stages: Vec<Stage>,
    /// Conditions for opening the location.
    #[serde(default)]
    pub unlock_reqs: Vec<UnlockRequirement>,
    /// Location-wide loot lines.
    #[serde(default)]
    pub drop_tables: Vec<DropTableEntry>,
}

/// Every location known to the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Locations in display order.
    pub locations: Vec<Location>,
}

impl Catalog {
    /// The catalog shipped with the game: the Grasslands with one farmable
    /// stage and one boss stage.
    pub fn builtin() -> Self {
        let slime = EnemyTemplate::new("slime", "Azure Slime", 1)
            .with_stat("hp", 120)
            .with_stat("atk", 15)
            .with_stat("def", 5)
            .with_tag("slime")
            .with_tag("basic");
        let sentinel = EnemyTemplate::new("oak-sentinel", "Oak Sentinel", 5)
            .with_stat("hp", 900)
            .with_stat("atk", 45)
            .with_stat("def", 20)
            .with_tag("boss")
            .with_tag("plant");

        Self {
            locations: vec![Location {
                id: LocationId::new("grasslands"),
                biome: Biome::Grasslands,
                difficulty: Difficulty::Normal,
                stages: vec![
                    Stage::new("grasslands-1", "Whispering Plains", vec![slime], 100).farmable(),
                    Stage::new("grasslands-boss", "Guardian Oak", vec![sentinel], 480).boss(),
                ],
                unlock_reqs: Vec::new(),
                drop_tables: Vec::new(),
            }],
        }
    }

    /// Parse a catalog from JSON and validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up a location by ID.
    pub fn location(&self, id: &LocationId) -> CoreResult<&Location> {
        self.locations
            .iter()
            .find(|l| &l.id == id)
            .ok_or_else(|| CoreError::LocationNotFound(id.clone()))
    }

    /// Look up a stage by ID across all locations.
    pub fn stage(&self, id: &StageId) -> CoreResult<&Stage> {
        self.stages()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::StageNotFound(id.clone()))
    }

    /// Iterate all stages in location order.
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.locations.iter().flat_map(|l| l.stages.iter())
    }

    /// Check that stage IDs are unique and every drop line is well formed.
    pub fn validate(&self) -> CoreResult<()> {
        let mut seen = HashSet::new();
        for stage in self.stages() {
            if !seen.insert(&stage.id) {
                return Err(CoreError::Validation(format!(
                    "duplicate stage id \"{}\"",
                    stage.id
                )));
            }
        }

        let drops = self.locations.iter().flat_map(|l| {
            l.drop_tables
                .iter()
                .chain(l.stages.iter().flat_map(|s| s.drop_table.iter()))
        });
        for entry in drops {
            if entry.weight == 0 {
                return Err(CoreError::Validation(format!(
                    "drop entry \"{}\" has zero weight",
                    entry.item_id
                )));
            }
            if entry.min_quantity > entry.max_quantity {
                return Err(CoreError::Validation(format!(
                    "drop entry \"{}\" has min quantity {} above max {}",
                    entry.item_id, entry.min_quantity, entry.max_quantity
                )));
            }
        }
        Ok(())
    }
}
