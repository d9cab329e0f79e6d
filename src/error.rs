use crate::core::Ticks;

/// Fatal simulation failures. None of these are retryable within a run; the
/// run coordinator surfaces them to its caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Malformed policy or workload parameters, caught at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The engine can make no further progress: every remaining activity is
    /// idling with nothing left to wake it, yet unfinished processes remain.
    #[error("simulation stalled at t={now}: {completed}/{total} processes completed")]
    SimulationStalled {
        now: Ticks,
        completed: usize,
        total: usize,
    },

    /// An internal contract breach (e.g. a policy selected a completed
    /// process, or remaining time would go negative). Signals a bug in a
    /// policy implementation; never clamped or swallowed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
