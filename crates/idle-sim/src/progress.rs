//! Wave progression within a stage.
//!
//! `InProgress(i)` advances to `InProgress(i + 1)` on each wave clear and to
//! `Cleared` once the last wave falls. The wave index never decreases.

use std::fmt;

/// Where a stage run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Fighting the wave at this index.
    InProgress(usize),
    /// Every wave has been cleared.
    Cleared,
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress(i) => write!(f, "wave {}", i + 1),
            Self::Cleared => write!(f, "cleared"),
        }
    }
}

/// Result of recording a wave clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTransition {
    /// The next wave is now active; holds the new wave index.
    NextWave(usize),
    /// That was the last wave.
    StageCleared,
}

/// Single owner of the wave index for one stage run.
#[derive(Debug, Clone)]
pub struct StageProgress {
    wave_index: usize,
    wave_count: usize,
}

impl StageProgress {
    /// Start at wave 0 of a stage with `wave_count` waves.
    pub fn new(wave_count: usize) -> Self {
        Self {
            wave_index: 0,
            wave_count,
        }
    }

    /// Current state. A stage with no waves starts out `Cleared`.
    pub fn state(&self) -> ProgressState {
        if self.wave_index >= self.wave_count {
            ProgressState::Cleared
        } else {
            ProgressState::InProgress(self.wave_index)
        }
    }

    /// Index of the active wave, or the wave count once cleared.
    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    /// Total number of waves.
    pub fn wave_count(&self) -> usize {
        self.wave_count
    }

    /// Returns `true` once every wave has been cleared.
    pub fn is_cleared(&self) -> bool {
        self.wave_index >= self.wave_count
    }

    /// Record that the active wave was cleared. Has no effect once the stage
    /// is already cleared: the index is clamped at the wave count.
    pub fn record_clear(&mut self) -> WaveTransition {
        if self.is_cleared() {
            return WaveTransition::StageCleared;
        }
        self.wave_index += 1;
        if self.is_cleared() {
            WaveTransition::StageCleared
        } else {
            WaveTransition::NextWave(self.wave_index)
        }
    }
}
