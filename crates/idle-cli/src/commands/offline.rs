use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use idle_core::{Formation, ResourceType};
use idle_sim::{Callbacks, Engine, RandomResolver};

use super::EngineArgs;

/// Offline-only overrides applied on top of the engine config.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub cap_hours: Option<f64>,
    pub ticks_per_slice: Option<u32>,
}

/// Resolve the offline duration from either an explicit span or the time of
/// the last session.
pub fn elapsed(elapsed_ms: Option<f64>, since: Option<&str>) -> Result<f64, String> {
    match (elapsed_ms, since) {
        (Some(ms), _) => Ok(ms),
        (None, Some(since)) => {
            let since = DateTime::parse_from_rfc3339(since)
                .map_err(|e| format!("invalid --since timestamp '{since}': {e}"))?;
            let away = Utc::now().signed_duration_since(since.with_timezone(&Utc));
            Ok(away.num_milliseconds() as f64)
        }
        (None, None) => Err("one of --elapsed-ms or --since is required".into()),
    }
}

pub fn run(
    stage_id: &str,
    elapsed_ms: f64,
    overrides: Overrides,
    args: &EngineArgs,
    json: bool,
) -> Result<(), String> {
    let stage = super::find_stage(args.data.as_deref(), stage_id)?;
    let mut config = args.engine_config()?;
    if let Some(hours) = overrides.cap_hours {
        config = config.with_offline_cap_hours(hours);
    }
    if let Some(ticks) = overrides.ticks_per_slice {
        config = config.with_ticks_per_slice(ticks);
    }
    config.validate().map_err(|e| e.to_string())?;

    let waves_cleared = Rc::new(Cell::new(0usize));
    let counter = waves_cleared.clone();
    let observer = Callbacks::new().on_wave_cleared(move |_| counter.set(counter.get() + 1));

    let seed = config.seed;
    let mut engine = Engine::new(
        config,
        Arc::new(Formation::default()),
        Arc::new(stage),
        RandomResolver::new(seed),
        observer,
    )
    .map_err(|e| format!("simulation init failed: {e}"))?;

    engine.start();
    let report = engine
        .simulate_offline(elapsed_ms)
        .map_err(|e| format!("simulation error: {e}"))?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize report: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} '{}' {}",
        "Offline".bold(),
        engine.stage().name,
        format!("({}, seed={seed})", engine.stage().id).dimmed()
    );
    if report.capped {
        println!(
            "  {} away {:.2}h, credited {:.2}h (cap {}h)",
            "CAPPED".yellow().bold(),
            report.requested_ms / idle_sim::config::MS_PER_HOUR,
            report.clamped_ms / idle_sim::config::MS_PER_HOUR,
            engine.config().offline_cap_hours
        );
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Credited ms",
        "Simulated ticks",
        "Executed ticks",
        "Waves cleared",
        "Completed",
        "Gold",
    ]);
    let gold = engine
        .result()
        .map(|r| r.rewards.get(ResourceType::Gold))
        .unwrap_or(0);
    table.add_row(vec![
        format!("{:.0}", report.clamped_ms),
        report.simulated_ticks.to_string(),
        report.executed_ticks.to_string(),
        waves_cleared.get().to_string(),
        if report.completed { "yes" } else { "no" }.to_string(),
        gold.to_string(),
    ]);

    println!("{table}");
    println!();

    Ok(())
}
