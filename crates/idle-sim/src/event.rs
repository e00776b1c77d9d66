use std::fmt;

use idle_core::EnemyId;
use serde::{Deserialize, Serialize};

/// Actor id used for events attributed to the whole formation.
pub const FORMATION_ACTOR: &str = "formation";

/// One observable combat action produced by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Simulated tick that produced the event.
    pub tick: u64,
    /// Simulated milliseconds since the engine was created.
    pub timestamp_ms: u64,
    /// The acting entity.
    pub actor_id: String,
    /// Human-readable action.
    pub action: String,
    /// Damage or healing magnitude, if any.
    pub value: Option<u32>,
    /// The enemy targeted, if any.
    pub target_id: Option<EnemyId>,
    /// Whether the action was a critical hit.
    pub critical: bool,
}

impl CombatEvent {
    /// Create an event with no magnitude, target, or crit.
    pub fn new(
        tick: u64,
        timestamp_ms: u64,
        actor_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            tick,
            timestamp_ms,
            actor_id: actor_id.into(),
            action: action.into(),
            value: None,
            target_id: None,
            critical: false,
        }
    }

    /// Attach a magnitude.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach a target.
    pub fn with_target(mut self, target: EnemyId) -> Self {
        self.target_id = Some(target);
        self
    }

    /// Set the critical flag.
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        if let Some(value) = self.value {
            write!(f, " for {value}")?;
        }
        if self.critical {
            write!(f, " (CRIT!)")?;
        }
        Ok(())
    }
}

/// Host-side retention of combat events. The engine keeps no history; a
/// host that wants one registers an `EventLog` as its observer.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<CombatEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Return all events produced at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&CombatEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return the number of critical hits recorded.
    pub fn critical_count(&self) -> usize {
        self.events.iter().filter(|e| e.critical).count()
    }

    /// Sum of all recorded magnitudes.
    pub fn total_value(&self) -> u64 {
        self.events
            .iter()
            .filter_map(|e| e.value)
            .map(u64::from)
            .sum()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike(tick: u64, value: u32, critical: bool) -> CombatEvent {
        CombatEvent::new(tick, tick * 1000, FORMATION_ACTOR, "Formation strikes Azure Slime")
            .with_value(value)
            .with_target(EnemyId::new("slime"))
            .with_critical(critical)
    }

    #[test]
    fn display_matches_combat_log_format() {
        assert_eq!(
            strike(1, 120, false).to_string(),
            "Formation strikes Azure Slime for 120"
        );
        assert_eq!(
            strike(1, 180, true).to_string(),
            "Formation strikes Azure Slime for 180 (CRIT!)"
        );
        assert_eq!(
            CombatEvent::new(1, 0, "hero-aurora", "Cast Arcane Bolt").to_string(),
            "Cast Arcane Bolt"
        );
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(strike(1, 100, false));
        log.push(strike(2, 50, true));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events_at_tick(2).len(), 1);
        assert_eq!(log.critical_count(), 1);
        assert_eq!(log.total_value(), 150);
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(strike(i, 10, false));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(strike(1, 10, false));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
