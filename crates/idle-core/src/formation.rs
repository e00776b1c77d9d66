use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{FormationId, HeroId};

/// Number of slots in a freshly created formation.
pub const DEFAULT_SLOT_COUNT: usize = 6;

/// The battlefield role a slot is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroRole {
    /// Front line, absorbs damage.
    Tank,
    /// Damage dealer.
    #[serde(rename = "DPS")]
    Dps,
    /// Healer or buffer.
    Support,
    /// Crowd control.
    Controller,
}

impl fmt::Display for HeroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tank => write!(f, "Tank"),
            Self::Dps => write!(f, "DPS"),
            Self::Support => write!(f, "Support"),
            Self::Controller => write!(f, "Controller"),
        }
    }
}

/// One position in a formation, optionally occupied by a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationSlot {
    /// Stable slot identifier (e.g. `slot-3`).
    pub slot_id: String,
    /// The hero placed in this slot, if any.
    pub hero_id: Option<HeroId>,
    /// 1-based position within the formation.
    pub position: u32,
    /// Suggested role for the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_hint: Option<HeroRole>,
}

/// An ordered set of slots the player fills with heroes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    /// Formation identifier.
    pub id: FormationId,
    /// Display name.
    pub name: String,
    /// Slots, in the order they were defined.
    pub slots: Vec<FormationSlot>,
}

impl Default for Formation {
    fn default() -> Self {
        Self::with_empty_slots(DEFAULT_SLOT_COUNT)
    }
}

impl Formation {
    /// Create the `default` formation with `count` empty slots named
    /// `slot-1` through `slot-{count}`.
    pub fn with_empty_slots(count: usize) -> Self {
        let slots = (1..=count)
            .map(|i| FormationSlot {
                slot_id: format!("slot-{i}"),
                hero_id: None,
                position: i as u32,
                role_hint: None,
            })
            .collect();
        Self {
            id: FormationId::new("default"),
            name: "Default".to_string(),
            slots,
        }
    }

    /// Place a hero in the slot at `position`. Returns `false` if no slot has
    /// that position.
    pub fn assign(&mut self, position: u32, hero: HeroId) -> bool {
        match self.slots.iter_mut().find(|s| s.position == position) {
            Some(slot) => {
                slot.hero_id = Some(hero);
                true
            }
            None => false,
        }
    }

    /// Heroes in occupied slots, ordered by slot position.
    pub fn heroes(&self) -> Vec<&HeroId> {
        let mut occupied: Vec<_> = self
            .slots
            .iter()
            .filter_map(|s| s.hero_id.as_ref().map(|h| (s.position, h)))
            .collect();
        occupied.sort_by_key(|(pos, _)| *pos);
        occupied.into_iter().map(|(_, h)| h).collect()
    }

    /// Returns `true` if no slot holds a hero.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.hero_id.is_none())
    }
}
