//! Fixed-timestep combat simulation for the idle RPG.
//!
//! An [`Engine`] turns irregular real-time deltas into whole simulation
//! ticks, resolves each tick against the active wave of a
//! [`Stage`](idle_core::Stage) through a pluggable [`CombatResolver`], and
//! reports events, wave clears, and the final [`StageResult`] to an
//! [`EngineObserver`]. Offline catch-up runs the same loop over a capped,
//! sliced span of time. The engine never reads a clock or touches storage.

/// Real-time to tick conversion with a carried remainder.
pub mod accumulator;
/// Simulated tick counter.
pub mod clock;
/// Configuration for an engine run.
pub mod config;
/// Read-only view handed to resolvers each tick.
pub mod context;
/// The simulation engine.
pub mod engine;
/// Error types for the simulation crate.
pub mod error;
/// Combat events and the host-side event log.
pub mod event;
/// Outbound notifications to the host.
pub mod observer;
/// Offline catch-up planning and reporting.
pub mod offline;
/// Wave progression state machine.
pub mod progress;
/// The combat resolver capability and bundled implementations.
pub mod resolver;
/// Stage reward calculation.
pub mod reward;

/// Re-export of [`accumulator::TickAccumulator`].
pub use accumulator::TickAccumulator;
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::EngineConfig`].
pub use config::EngineConfig;
/// Re-export of [`context::TickContext`].
pub use context::TickContext;
/// Re-exports of the engine and its reports.
pub use engine::{AdvanceReport, Engine, EngineState};
/// Re-exports of [`error::SimError`], [`error::SimResult`], and [`error::ResolveError`].
pub use error::{ResolveError, SimError, SimResult};
/// Re-exports of [`event::CombatEvent`] and [`event::EventLog`].
pub use event::{CombatEvent, EventLog};
/// Re-exports of the observer trait and the closure-based observer.
pub use observer::{Callbacks, EngineObserver};
/// Re-exports of offline catch-up types.
pub use offline::{OfflinePlan, OfflineReport};
/// Re-exports of the progress state machine.
pub use progress::{ProgressState, StageProgress, WaveTransition};
/// Re-exports of the resolver capability and bundled resolvers.
pub use resolver::{CombatResolver, RandomOdds, RandomResolver, ScriptedResolver, TickOutcome};
/// Re-exports of the reward calculator.
pub use reward::{StageResult, reward_bundle, stage_reward};
