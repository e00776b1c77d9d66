//! Core data for the idle RPG: formations, stages, the world catalog,
//! resources, and progression curves.
//!
//! Everything here is static configuration. The simulation engine in
//! `idle-sim` reads these types but never mutates them; you can build them
//! programmatically or deserialize a [`Catalog`] from JSON.

/// Error types used throughout the crate.
pub mod error;
/// Formation slots and hero assignment.
pub mod formation;
/// String identifiers for heroes, enemies, stages, locations, and formations.
pub mod id;
/// XP curves and feature unlock rules.
pub mod progression;
/// Resource types and reward bundles.
pub mod resource;
/// Stages, waves of enemies, and drop tables.
pub mod stage;
/// Locations and the world catalog.
pub mod world;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export formation types.
pub use formation::{Formation, FormationSlot, HeroRole};
/// Re-export identifier types.
pub use id::{EnemyId, FormationId, HeroId, LocationId, StageId};
/// Re-export resource types.
pub use resource::{ResourceBundle, ResourceType};
/// Re-export stage types.
pub use stage::{DropTableEntry, EnemyTemplate, Stage};
/// Re-export world catalog types.
pub use world::{Biome, Catalog, Difficulty, Location, UnlockRequirement};
