/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// The tick interval must be at least 1 ms.
    #[error("invalid tick interval: {0} ms (must be > 0)")]
    InvalidTickInterval(u32),

    /// The offline cap must be a finite, non-negative number of hours.
    #[error("invalid offline cap: {0} hours (must be >= 0)")]
    InvalidOfflineCap(f64),

    /// At least one tick must be simulated per offline slice.
    #[error("invalid ticks per slice: {0} (must be >= 1)")]
    InvalidTicksPerSlice(u32),

    /// The reward multiplier must be a finite, non-negative number.
    #[error("invalid reward multiplier: {0} (must be >= 0)")]
    InvalidRewardMultiplier(f64),

    /// The combat resolver failed; the run was stopped.
    #[error("combat resolution failed at tick {tick} (wave {wave}): {message}")]
    Resolver {
        /// Simulated tick number that failed (1-based).
        tick: u64,
        /// Wave index being resolved.
        wave: usize,
        /// What the resolver reported.
        message: String,
    },
}

impl SimError {
    /// Returns `true` for errors raised while validating configuration.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::Resolver { .. })
    }
}

/// Failure reported by a combat resolver. The engine wraps it in
/// [`SimError::Resolver`] with the tick and wave it happened on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ResolveError(pub String);

impl ResolveError {
    /// Create a resolver error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
