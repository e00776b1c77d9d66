//! Outbound notifications from the engine to its host.
//!
//! Every callback runs synchronously inside the engine call that triggered
//! it, in tick order: a tick's combat event is delivered before its wave
//! clear, and a wave clear before the completion it causes.

use crate::event::{CombatEvent, EventLog};
use crate::reward::StageResult;

/// Receives engine notifications. All methods default to no-ops.
pub trait EngineObserver {
    /// A resolver produced a combat event.
    fn on_event(&mut self, _event: &CombatEvent) {}

    /// A wave was cleared. `wave_index` is the index of the wave that is now
    /// active (equal to the wave count once the last wave falls).
    fn on_wave_cleared(&mut self, _wave_index: usize) {}

    /// The stage was completed. Called exactly once per run.
    fn on_complete(&mut self, _result: &StageResult) {}
}

/// The observer that ignores everything.
impl EngineObserver for () {}

impl<O: EngineObserver + ?Sized> EngineObserver for &mut O {
    fn on_event(&mut self, event: &CombatEvent) {
        (**self).on_event(event);
    }

    fn on_wave_cleared(&mut self, wave_index: usize) {
        (**self).on_wave_cleared(wave_index);
    }

    fn on_complete(&mut self, result: &StageResult) {
        (**self).on_complete(result);
    }
}

impl<O: EngineObserver + ?Sized> EngineObserver for Box<O> {
    fn on_event(&mut self, event: &CombatEvent) {
        (**self).on_event(event);
    }

    fn on_wave_cleared(&mut self, wave_index: usize) {
        (**self).on_wave_cleared(wave_index);
    }

    fn on_complete(&mut self, result: &StageResult) {
        (**self).on_complete(result);
    }
}

impl EngineObserver for EventLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.push(event.clone());
    }
}

type EventFn = Box<dyn FnMut(&CombatEvent)>;
type WaveFn = Box<dyn FnMut(usize)>;
type CompleteFn = Box<dyn FnMut(&StageResult)>;

/// Three optional closures, for hosts that prefer callbacks to a trait impl.
#[derive(Default)]
pub struct Callbacks {
    on_event: Option<EventFn>,
    on_wave_cleared: Option<WaveFn>,
    on_complete: Option<CompleteFn>,
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_event", &self.on_event.is_some())
            .field("on_wave_cleared", &self.on_wave_cleared.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Callbacks {
    /// No callbacks registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the combat event callback.
    pub fn on_event(mut self, f: impl FnMut(&CombatEvent) + 'static) -> Self {
        self.on_event = Some(Box::new(f));
        self
    }

    /// Register the wave cleared callback.
    pub fn on_wave_cleared(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_wave_cleared = Some(Box::new(f));
        self
    }

    /// Register the completion callback.
    pub fn on_complete(mut self, f: impl FnMut(&StageResult) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl EngineObserver for Callbacks {
    fn on_event(&mut self, event: &CombatEvent) {
        if let Some(f) = self.on_event.as_mut() {
            f(event);
        }
    }

    fn on_wave_cleared(&mut self, wave_index: usize) {
        if let Some(f) = self.on_wave_cleared.as_mut() {
            f(wave_index);
        }
    }

    fn on_complete(&mut self, result: &StageResult) {
        if let Some(f) = self.on_complete.as_mut() {
            f(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_core::ResourceBundle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callbacks_forward_to_closures() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (seen.clone(), seen.clone(), seen.clone());
        let mut cb = Callbacks::new()
            .on_event(move |e| a.borrow_mut().push(format!("event {}", e.tick)))
            .on_wave_cleared(move |i| b.borrow_mut().push(format!("wave {i}")))
            .on_complete(move |r| c.borrow_mut().push(format!("done {}", r.victory)));

        EngineObserver::on_event(&mut cb, &CombatEvent::new(3, 3000, "formation", "strike"));
        EngineObserver::on_wave_cleared(&mut cb, 1);
        EngineObserver::on_complete(&mut cb, &StageResult {
            victory: true,
            rewards: ResourceBundle::new(),
        });

        assert_eq!(*seen.borrow(), vec!["event 3", "wave 1", "done true"]);
    }

    #[test]
    fn missing_callbacks_are_no_ops() {
        let mut cb = Callbacks::new();
        EngineObserver::on_wave_cleared(&mut cb, 2);
        assert!(format!("{cb:?}").contains("on_event: false"));
    }

    #[test]
    fn event_log_records_events() {
        let mut log = EventLog::new(0);
        let observer: &mut dyn EngineObserver = &mut log;
        observer.on_event(&CombatEvent::new(1, 1000, "formation", "strike"));
        observer.on_wave_cleared(1);
        assert_eq!(log.len(), 1);
    }
}
