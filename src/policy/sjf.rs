use super::{Policy, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};

/// Shortest Job First, non-preemptive: smallest total burst runs to
/// completion; ties go to the earlier queue position.
pub struct Sjf;

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        debug_assert!(running.is_none(), "SJF is non-preemptive");
        match queue.position_min_by_key(|p| p.burst) {
            Some(index) => Verdict::Dispatch {
                index,
                quantum: queue.get(index).map(|p| p.remaining).unwrap_or(0),
            },
            None => Verdict::Idle,
        }
    }
}
