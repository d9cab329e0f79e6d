use super::{Policy, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};

/// Non-preemptive priority scheduling; lower value means more urgent, ties
/// go to the earlier queue position.
pub struct PriorityPolicy;

impl Policy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        debug_assert!(running.is_none(), "Priority is non-preemptive");
        match queue.position_min_by_key(|p| p.priority) {
            Some(index) => Verdict::Dispatch {
                index,
                quantum: queue.get(index).map(|p| p.remaining).unwrap_or(0),
            },
            None => Verdict::Idle,
        }
    }
}
