pub mod offline;
pub mod reward;
pub mod run;
pub mod stages;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use idle_core::{Catalog, Formation, HeroId, Stage, StageId};
use idle_sim::EngineConfig;

/// Engine flags shared by `run` and `offline`.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Engine config JSON file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// World catalog JSON file (default: built-in catalog)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// RNG seed for the combat resolver
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Simulated milliseconds per tick
    #[arg(long)]
    pub tick_ms: Option<u32>,

    /// Reward bonus multiplier
    #[arg(long)]
    pub multiplier: Option<f64>,
}

impl EngineArgs {
    /// Load the config file (if any) and apply flag overrides.
    pub fn engine_config(&self) -> Result<EngineConfig, String> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(ms) = self.tick_ms {
            config = config.with_tick_interval_ms(ms);
        }
        if let Some(m) = self.multiplier {
            config = config.with_reward_multiplier(m);
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

/// Load a catalog from `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read catalog {}: {e}", path.display()))?;
    Catalog::from_json(&json).map_err(|e| format!("invalid catalog {}: {e}", path.display()))
}

/// Look up a stage by id in the catalog named by `data`.
pub fn find_stage(data: Option<&Path>, id: &str) -> Result<Stage, String> {
    let catalog = load_catalog(data)?;
    catalog
        .stage(&StageId::new(id))
        .cloned()
        .map_err(|e| e.to_string())
}

/// A default formation with `heroes` assigned to slots front to back.
pub fn formation(heroes: &[String]) -> Result<Formation, String> {
    let mut formation = Formation::default();
    for (i, hero) in heroes.iter().enumerate() {
        let position = u32::try_from(i + 1).map_err(|_| "too many heroes".to_string())?;
        if !formation.assign(position, HeroId::new(hero.as_str())) {
            return Err(format!(
                "formation has {} slots, cannot place hero '{hero}'",
                formation.slots.len()
            ));
        }
    }
    Ok(formation)
}
