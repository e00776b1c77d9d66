use std::sync::Arc;

use idle_core::{Formation, Stage};
use tracing::{debug, info, trace, warn};

use crate::accumulator::{TickAccumulator, sanitize_elapsed};
use crate::clock::SimClock;
use crate::config::EngineConfig;
use crate::context::TickContext;
use crate::error::{SimError, SimResult};
use crate::observer::EngineObserver;
use crate::offline::{OfflinePlan, OfflineReport};
use crate::progress::{ProgressState, StageProgress, WaveTransition};
use crate::resolver::CombatResolver;
use crate::reward::{StageResult, reward_bundle};

/// Snapshot of the engine's mutable run state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    /// Whether `advance` currently executes ticks.
    pub running: bool,
    /// Carried real time, always below one tick interval between calls.
    pub accumulated_ms: f64,
    /// Active wave index; equals the wave count once the stage is cleared.
    pub wave_index: usize,
}

/// What one `advance` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Ticks executed during the call.
    pub ticks: u64,
    /// Whether the stage completed during the call.
    pub completed: bool,
}

/// Fixed-timestep stage simulation.
///
/// Owns the run state, the combat resolver, and the observer. Formation and
/// stage are shared read-only. Drivers feed elapsed real time through
/// [`advance`](Self::advance) or [`simulate_offline`](Self::simulate_offline);
/// the engine never reads a clock itself.
pub struct Engine<R, O = ()> {
    config: EngineConfig,
    formation: Arc<Formation>,
    stage: Arc<Stage>,
    resolver: R,
    observer: O,
    clock: SimClock,
    accumulator: TickAccumulator,
    progress: StageProgress,
    running: bool,
    result: Option<StageResult>,
}

impl<R, O> std::fmt::Debug for Engine<R, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("stage", &self.stage.id)
            .field("tick", &self.clock.tick())
            .field("tick_interval_ms", &self.clock.tick_interval_ms())
            .field("running", &self.running)
            .field("accumulated_ms", &self.accumulator.accumulated_ms())
            .field("progress", &self.progress.state())
            .finish()
    }
}

impl<R: CombatResolver, O: EngineObserver> Engine<R, O> {
    /// Create a stopped engine at wave 0. Fails if `config` is invalid.
    pub fn new(
        config: EngineConfig,
        formation: Arc<Formation>,
        stage: Arc<Stage>,
        resolver: R,
        observer: O,
    ) -> SimResult<Self> {
        config.validate()?;
        let clock = SimClock::new(config.tick_interval_ms);
        let accumulator = TickAccumulator::new(config.tick_interval_ms);
        let progress = StageProgress::new(stage.wave_count());
        Ok(Self {
            config,
            formation,
            stage,
            resolver,
            observer,
            clock,
            accumulator,
            progress,
            running: false,
            result: None,
        })
    }

    /// Begin (or resume) running and discard any carried time.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator.reset();
    }

    /// Stop running. Later `advance` calls do nothing until `start`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Add elapsed real time and execute every whole tick it covers.
    ///
    /// Does nothing while stopped. Negative and non-finite deltas count as
    /// zero. Stops early if the stage completes, discarding the remaining
    /// time. A resolver failure stops the run and is returned.
    pub fn advance(&mut self, elapsed_real_ms: f64) -> SimResult<AdvanceReport> {
        if !self.running {
            return Ok(AdvanceReport::default());
        }
        self.accumulator.add(elapsed_real_ms);
        self.drain()
    }

    /// Render-loop entry point: advance by `elapsed_real_ms` scaled by the
    /// configured ticks per slice.
    pub fn advance_frame(&mut self, elapsed_real_ms: f64) -> SimResult<AdvanceReport> {
        let scaled = sanitize_elapsed(elapsed_real_ms) * f64::from(self.config.ticks_per_slice);
        self.advance(scaled)
    }

    /// Catch up on time spent offline.
    ///
    /// The elapsed time is clamped to the offline cap and split into slices
    /// of one tick interval; each slice advances the engine by
    /// `ticks_per_slice` ticks. Stops early once the engine stops.
    pub fn simulate_offline(&mut self, elapsed_ms: f64) -> SimResult<OfflineReport> {
        let plan = OfflinePlan::new(elapsed_ms, &self.config);
        if plan.capped {
            warn!(
                requested_ms = plan.requested_ms,
                cap_ms = self.config.offline_cap_ms(),
                "offline time exceeds cap, clamping"
            );
        }

        let slice_ms = self.config.tick_interval() * f64::from(self.config.ticks_per_slice);
        let mut executed_ticks = 0;
        let mut completed = false;
        for _ in 0..plan.slices {
            if !self.running {
                break;
            }
            let report = self.advance(slice_ms)?;
            executed_ticks += report.ticks;
            if report.completed {
                completed = true;
                break;
            }
        }

        let report = OfflineReport {
            simulated_ticks: plan.simulated_ticks(&self.config),
            executed_ticks,
            requested_ms: plan.requested_ms,
            clamped_ms: plan.clamped_ms,
            capped: plan.capped,
            completed,
        };
        info!(
            stage = %self.stage.id,
            simulated_ticks = report.simulated_ticks,
            executed_ticks = report.executed_ticks,
            completed = report.completed,
            "offline catch-up finished"
        );
        Ok(report)
    }

    /// Execute ticks while whole intervals remain and the engine runs.
    fn drain(&mut self) -> SimResult<AdvanceReport> {
        let mut report = AdvanceReport::default();
        while self.running && self.accumulator.try_consume() {
            let completed = self.step()?;
            report.ticks += 1;
            if completed {
                report.completed = true;
                break;
            }
        }
        Ok(report)
    }

    /// Run one tick. Returns `true` if the stage completed.
    fn step(&mut self) -> SimResult<bool> {
        let wave_index = self.progress.wave_index();
        let Some(wave) = self.stage.wave(wave_index) else {
            // Nothing left to fight: terminal without resolution.
            self.clock.advance();
            self.finish();
            return Ok(true);
        };

        let tick = self.clock.tick() + 1;
        let ctx = TickContext {
            tick,
            timestamp_ms: tick * u64::from(self.clock.tick_interval_ms()),
            wave_index,
            wave,
            formation: &self.formation,
            stage: &self.stage,
        };
        let outcome = match self.resolver.resolve(&ctx) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.running = false;
                self.accumulator.reset();
                warn!(
                    tick,
                    wave = wave_index,
                    resolver = self.resolver.name(),
                    error = %e,
                    "combat resolution failed, stopping run"
                );
                return Err(SimError::Resolver {
                    tick,
                    wave: wave_index,
                    message: e.to_string(),
                });
            }
        };

        self.clock.advance();
        trace!(tick, wave = wave_index, cleared = outcome.wave_cleared, "tick");

        if let Some(event) = &outcome.event {
            self.observer.on_event(event);
        }
        if !outcome.wave_cleared {
            return Ok(false);
        }

        match self.progress.record_clear() {
            WaveTransition::NextWave(next) => {
                debug!(tick, wave = next, "wave cleared");
                self.observer.on_wave_cleared(next);
                Ok(false)
            }
            WaveTransition::StageCleared => {
                let cleared = self.progress.wave_index();
                debug!(tick, wave = cleared, "final wave cleared");
                self.observer.on_wave_cleared(cleared);
                self.finish();
                Ok(true)
            }
        }
    }

    /// Stop the run and report completion the first time the stage clears.
    fn finish(&mut self) {
        self.running = false;
        self.accumulator.reset();
        if self.result.is_some() {
            return;
        }
        let result = StageResult {
            victory: true,
            rewards: reward_bundle(&self.stage, self.config.reward_multiplier),
        };
        info!(
            stage = %self.stage.id,
            ticks = self.clock.tick(),
            rewards = ?result.rewards,
            "stage complete"
        );
        self.observer.on_complete(&result);
        self.result = Some(result);
    }

    /// Whether `advance` currently executes ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Carried real time in milliseconds.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator.accumulated_ms()
    }

    /// Index of the active wave.
    pub fn wave_index(&self) -> usize {
        self.progress.wave_index()
    }

    /// Current stage progress.
    pub fn progress(&self) -> ProgressState {
        self.progress.state()
    }

    /// Snapshot of the run state.
    pub fn state(&self) -> EngineState {
        EngineState {
            running: self.running,
            accumulated_ms: self.accumulator.accumulated_ms(),
            wave_index: self.progress.wave_index(),
        }
    }

    /// Total ticks executed since construction.
    pub fn ticks_executed(&self) -> u64 {
        self.clock.tick()
    }

    /// Simulated time elapsed since construction.
    pub fn simulated_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// The completion result, once the stage has been cleared.
    pub fn result(&self) -> Option<&StageResult> {
        self.result.as_ref()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The stage being simulated.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The formation fighting the stage.
    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    /// The combat resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the engine, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}
