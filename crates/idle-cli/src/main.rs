//! CLI host for the idle RPG simulation engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::EngineArgs;

#[derive(Parser)]
#[command(
    name = "idle",
    about = "Idle RPG stage simulator: run stages, catch up offline time, price rewards",
    version,
    propagate_version = true
)]
struct Cli {
    /// Show the combat log and debug-level diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stages in the world catalog
    Stages {
        /// World catalog JSON file (default: built-in catalog)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Run a stage in real-time frames until it completes
    Run {
        /// Stage id to run
        #[arg(long)]
        stage: String,

        /// Real milliseconds per frame
        #[arg(long, default_value = "16")]
        frame_ms: f64,

        /// Maximum number of frames to drive
        #[arg(long, default_value = "100000")]
        frames: u64,

        /// Hero ids to place in the formation, front to back
        #[arg(long = "hero")]
        heroes: Vec<String>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Simulate time spent offline on a stage
    Offline {
        /// Stage id to catch up on
        #[arg(long)]
        stage: String,

        /// Milliseconds spent offline
        #[arg(long, conflicts_with = "since", required_unless_present = "since")]
        elapsed_ms: Option<f64>,

        /// RFC 3339 timestamp of the last session; elapsed time runs to now
        #[arg(long)]
        since: Option<String>,

        /// Maximum offline hours credited
        #[arg(long)]
        cap_hours: Option<f64>,

        /// Ticks simulated per offline slice
        #[arg(long)]
        ticks_per_slice: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Compute the reward for clearing a stage of the given power
    Reward {
        /// Recommended power of the stage
        power: f64,

        /// Bonus multiplier applied to the base reward
        #[arg(short, long, default_value = "1.0")]
        multiplier: f64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Stages { data } => commands::stages::run(data.as_deref()),
        Commands::Run {
            stage,
            frame_ms,
            frames,
            heroes,
            engine,
        } => commands::run::run(&stage, frame_ms, frames, &heroes, &engine, cli.verbose),
        Commands::Offline {
            stage,
            elapsed_ms,
            since,
            cap_hours,
            ticks_per_slice,
            json,
            engine,
        } => commands::offline::elapsed(elapsed_ms, since.as_deref()).and_then(|elapsed| {
            let overrides = commands::offline::Overrides {
                cap_hours,
                ticks_per_slice,
            };
            commands::offline::run(&stage, elapsed, overrides, &engine, json)
        }),
        Commands::Reward { power, multiplier } => commands::reward::run(power, multiplier),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
