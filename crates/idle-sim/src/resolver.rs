//! Pluggable per-tick combat resolution.
//!
//! The engine only needs two things from a tick: at most one event and a
//! wave-cleared decision. How they are computed is up to the resolver:
//! - **Random**: seeded placeholder rolls, reproducible for a given seed
//! - **Scripted**: fully deterministic, clears a wave every N ticks

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::context::TickContext;
use crate::error::ResolveError;
use crate::event::{CombatEvent, FORMATION_ACTOR};

/// What one tick of combat produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The summarizing event for this tick, if any.
    pub event: Option<CombatEvent>,
    /// Whether the active wave was cleared this tick.
    pub wave_cleared: bool,
}

impl TickOutcome {
    /// A tick with no event that does not clear the wave.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Resolves one tick of combat against the active wave.
///
/// Implementations signal intent only: wave advancement is applied by the
/// engine. An `Err` stops the run before any part of the tick is applied.
pub trait CombatResolver {
    /// Human-readable name for this resolver.
    fn name(&self) -> &str;

    /// Resolve one tick.
    fn resolve(&mut self, ctx: &TickContext<'_>) -> Result<TickOutcome, ResolveError>;
}

impl<R: CombatResolver + ?Sized> CombatResolver for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&mut self, ctx: &TickContext<'_>) -> Result<TickOutcome, ResolveError> {
        (**self).resolve(ctx)
    }
}

/// The formation's summarizing strike against the wave's lead enemy.
fn formation_strike(ctx: &TickContext<'_>, value: u32, critical: bool) -> CombatEvent {
    CombatEvent::new(
        ctx.tick,
        ctx.timestamp_ms,
        FORMATION_ACTOR,
        format!("Formation strikes {}", ctx.wave.name),
    )
    .with_value(value)
    .with_target(ctx.wave.id.clone())
    .with_critical(critical)
}

/// Odds used by [`RandomResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomOdds {
    /// Lowest strike magnitude (inclusive).
    pub min_value: u32,
    /// Highest strike magnitude (exclusive).
    pub max_value: u32,
    /// Probability that a strike is critical.
    pub crit_chance: f64,
    /// Probability that the wave falls this tick.
    pub clear_chance: f64,
}

impl Default for RandomOdds {
    fn default() -> Self {
        Self {
            min_value: 50,
            max_value: 200,
            crit_chance: 0.15,
            clear_chance: 0.3,
        }
    }
}

/// Placeholder combat: one strike per tick with random magnitude, crit, and
/// clear rolls drawn from a seeded RNG.
#[derive(Debug, Clone)]
pub struct RandomResolver {
    rng: StdRng,
    odds: RandomOdds,
}

impl RandomResolver {
    /// Create a resolver with the default odds.
    pub fn new(seed: u64) -> Self {
        Self::with_odds(seed, RandomOdds::default())
    }

    /// Create a resolver with custom odds. Probabilities are clamped to
    /// `[0, 1]` and an empty magnitude range collapses to `min_value`.
    pub fn with_odds(seed: u64, mut odds: RandomOdds) -> Self {
        odds.crit_chance = clamp_probability(odds.crit_chance);
        odds.clear_chance = clamp_probability(odds.clear_chance);
        odds.min_value = odds.min_value.min(u32::MAX - 1);
        odds.max_value = odds.max_value.max(odds.min_value + 1);
        Self {
            rng: StdRng::seed_from_u64(seed),
            odds,
        }
    }

    /// The odds in use.
    pub fn odds(&self) -> &RandomOdds {
        &self.odds
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

impl CombatResolver for RandomResolver {
    fn name(&self) -> &str {
        "random"
    }

    fn resolve(&mut self, ctx: &TickContext<'_>) -> Result<TickOutcome, ResolveError> {
        let value = self
            .rng
            .random_range(self.odds.min_value..self.odds.max_value);
        let critical = self.rng.random_bool(self.odds.crit_chance);
        let wave_cleared = self.rng.random_bool(self.odds.clear_chance);
        Ok(TickOutcome {
            event: Some(formation_strike(ctx, value, critical)),
            wave_cleared,
        })
    }
}

/// Deterministic combat: a fixed strike every tick, clearing each wave after
/// `ticks_per_wave` ticks on it.
#[derive(Debug, Clone)]
pub struct ScriptedResolver {
    ticks_per_wave: u64,
    damage: u32,
    emit_events: bool,
    fail_at_tick: Option<u64>,
    current_wave: Option<usize>,
    ticks_on_wave: u64,
}

impl ScriptedResolver {
    /// Clear each wave after `ticks_per_wave` ticks (at least 1).
    pub fn new(ticks_per_wave: u64) -> Self {
        Self {
            ticks_per_wave: ticks_per_wave.max(1),
            damage: 100,
            emit_events: true,
            fail_at_tick: None,
            current_wave: None,
            ticks_on_wave: 0,
        }
    }

    /// A resolver that never clears a wave.
    pub fn never_clears() -> Self {
        Self::new(u64::MAX)
    }

    /// Set the magnitude of every strike.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Produce no events, only wave-clear decisions.
    pub fn silent(mut self) -> Self {
        self.emit_events = false;
        self
    }

    /// Fail when asked to resolve the given tick.
    pub fn failing_at(mut self, tick: u64) -> Self {
        self.fail_at_tick = Some(tick);
        self
    }
}

impl CombatResolver for ScriptedResolver {
    fn name(&self) -> &str {
        "scripted"
    }

    fn resolve(&mut self, ctx: &TickContext<'_>) -> Result<TickOutcome, ResolveError> {
        if self.fail_at_tick == Some(ctx.tick) {
            return Err(ResolveError::new(format!(
                "scripted failure against {}",
                ctx.wave.name
            )));
        }

        if self.current_wave != Some(ctx.wave_index) {
            self.current_wave = Some(ctx.wave_index);
            self.ticks_on_wave = 0;
        }
        self.ticks_on_wave += 1;

        let wave_cleared = self.ticks_on_wave >= self.ticks_per_wave;
        let event = self
            .emit_events
            .then(|| formation_strike(ctx, self.damage, false));
        Ok(TickOutcome {
            event,
            wave_cleared,
        })
    }
}
