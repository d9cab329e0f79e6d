use super::state::{SimCtx, Ticks};
use crate::error::SimError;

/// Outcome of one activity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Suspend until `now + delta` virtual time units (0 yields at the same
    /// instant, after any other activity already due).
    Sleep(Ticks),
    /// Nothing actionable was observed; retry one tick later. Distinct from
    /// `Sleep(1)` so the engine can tell a timed wait from busy-waiting on
    /// state some other activity must change.
    Idle,
    /// Terminal; the activity is deregistered.
    Done,
}

/// A cooperative activity driven by the event engine. Each step runs to a
/// suspension point against the shared run state; activities never observe
/// each other directly.
pub trait Activity {
    fn step(&mut self, ctx: &mut SimCtx) -> Result<Step, SimError>;
}
