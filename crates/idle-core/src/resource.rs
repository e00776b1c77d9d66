use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A spendable currency or material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    /// Main soft currency.
    Gold,
    /// Premium currency.
    Gems,
    /// Upgrade essence.
    Essence,
    /// Keys spent to enter raids.
    RaidKeys,
    /// Crafting materials.
    CraftingMats,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Gems => write!(f, "gems"),
            Self::Essence => write!(f, "essence"),
            Self::RaidKeys => write!(f, "raidKeys"),
            Self::CraftingMats => write!(f, "craftingMats"),
        }
    }
}

/// Resource amounts keyed by type, iterated in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBundle(BTreeMap<ResourceType, u64>);

impl ResourceBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` of `resource`. Zero grants are not recorded.
    pub fn grant(&mut self, resource: ResourceType, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.0.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Builder form of [`grant`](Self::grant).
    pub fn with(mut self, resource: ResourceType, amount: u64) -> Self {
        self.grant(resource, amount);
        self
    }

    /// Amount held of `resource` (0 if absent).
    pub fn get(&self, resource: ResourceType) -> u64 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    /// Add every amount of `other` into this bundle.
    pub fn merge(&mut self, other: &ResourceBundle) {
        for (resource, amount) in other.iter() {
            self.grant(resource, amount);
        }
    }

    /// Iterate `(resource, amount)` pairs in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u64)> + '_ {
        self.0.iter().map(|(r, a)| (*r, *a))
    }

    /// Returns `true` if nothing has been granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_accumulates_and_skips_zero() {
        let mut bundle = ResourceBundle::new();
        bundle.grant(ResourceType::Gold, 120);
        bundle.grant(ResourceType::Gold, 30);
        bundle.grant(ResourceType::Gems, 0);
        assert_eq!(bundle.get(ResourceType::Gold), 150);
        assert_eq!(bundle.get(ResourceType::Gems), 0);
        assert_eq!(bundle.iter().count(), 1);
    }

    #[test]
    fn merge_adds_amounts() {
        let mut a = ResourceBundle::new().with(ResourceType::Gold, 100);
        let b = ResourceBundle::new()
            .with(ResourceType::Gold, 20)
            .with(ResourceType::Essence, 6);
        a.merge(&b);
        assert_eq!(a.get(ResourceType::Gold), 120);
        assert_eq!(a.get(ResourceType::Essence), 6);
    }

    #[test]
    fn serializes_as_plain_map() {
        let bundle = ResourceBundle::new()
            .with(ResourceType::Gold, 120)
            .with(ResourceType::Essence, 6);
        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(json, r#"{"gold":120,"essence":6}"#);
    }
}
