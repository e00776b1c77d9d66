use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use idle_core::ResourceType;
use idle_sim::{CombatEvent, EngineObserver, EventLog, RandomResolver, StageResult};

use super::EngineArgs;

/// Records the combat log and where each wave clear falls in it.
#[derive(Debug, Default)]
struct RunLog {
    events: EventLog,
    /// (events logged before the clear, wave index now active)
    clears: Vec<(usize, usize)>,
    completions: usize,
}

impl EngineObserver for RunLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.events.push(event.clone());
    }

    fn on_wave_cleared(&mut self, wave_index: usize) {
        self.clears.push((self.events.len(), wave_index));
    }

    fn on_complete(&mut self, _result: &StageResult) {
        self.completions += 1;
    }
}

pub fn run(
    stage_id: &str,
    frame_ms: f64,
    frames: u64,
    heroes: &[String],
    args: &EngineArgs,
    verbose: bool,
) -> Result<(), String> {
    let stage = super::find_stage(args.data.as_deref(), stage_id)?;
    let formation = super::formation(heroes)?;
    let config = args.engine_config()?;
    let seed = config.seed;
    let tick_ms = config.tick_interval_ms;

    let mut engine = idle_sim::Engine::new(
        config,
        Arc::new(formation),
        Arc::new(stage),
        RandomResolver::new(seed),
        RunLog::default(),
    )
    .map_err(|e| format!("simulation init failed: {e}"))?;

    engine.start();
    let mut frames_run = 0;
    while engine.is_running() && frames_run < frames {
        engine
            .advance_frame(frame_ms)
            .map_err(|e| format!("simulation error: {e}"))?;
        frames_run += 1;
    }

    // Header
    println!(
        "  {} '{}' {}",
        "Run".bold(),
        engine.stage().name,
        format!(
            "({}, seed={seed}, tick={tick_ms}ms, frame={frame_ms}ms)",
            engine.stage().id
        )
        .dimmed()
    );
    println!(
        "  {frames_run} frames, {} ticks, {:.1}s simulated",
        engine.ticks_executed(),
        engine.simulated_ms() as f64 / 1000.0
    );
    let heroes = engine.formation().heroes();
    if !heroes.is_empty() {
        let names: Vec<_> = heroes.iter().map(|h| h.as_str()).collect();
        println!("  Formation: {}", names.join(", "));
    }
    println!();

    let log = engine.observer();
    if verbose {
        print_combat_log(log);
    }

    // Result table
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Outcome", "Waves", "Hits", "Crits", "Damage", "Gold", "Essence"]);

    let (outcome, gold, essence) = match engine.result() {
        Some(result) => (
            "VICTORY".green().bold().to_string(),
            result.rewards.get(ResourceType::Gold),
            result.rewards.get(ResourceType::Essence),
        ),
        None => ("IN PROGRESS".yellow().bold().to_string(), 0, 0),
    };
    table.add_row(vec![
        outcome,
        format!("{}/{}", engine.wave_index(), engine.stage().wave_count()),
        log.events.len().to_string(),
        log.events.critical_count().to_string(),
        log.events.total_value().to_string(),
        gold.to_string(),
        essence.to_string(),
    ]);

    println!("{table}");
    println!();

    if engine.result().is_none() {
        println!(
            "  {} stage not cleared after {frames_run} frames",
            "WARN".yellow().bold()
        );
    }

    Ok(())
}

fn print_combat_log(log: &RunLog) {
    println!("  {}", "Combat Log".bold().underline());
    println!();

    let mut clears = log.clears.iter().peekable();
    let mut print_clears_at = |logged: usize| {
        while let Some((_, wave)) = clears.next_if(|(at, _)| *at == logged) {
            println!("  {}", format!("wave cleared, now on wave {wave}").green());
        }
    };

    print_clears_at(0);
    for (i, event) in log.events.events().iter().enumerate() {
        let tick_label = format!("[tick {:>4}]", event.tick).dimmed();
        let line = if event.critical {
            event.to_string().yellow().bold()
        } else {
            event.to_string().normal()
        };
        println!("  {tick_label} {line}");
        print_clears_at(i + 1);
    }
    if log.events.is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    if log.completions > 0 {
        println!("  {}", "stage complete".green().bold());
    }
    println!();
}
