use super::{Policy, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};

/// First Come First Serve: run the head of the queue to completion.
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        debug_assert!(running.is_none(), "FCFS is non-preemptive");
        match queue.get(0) {
            Some(head) => Verdict::Dispatch {
                index: 0,
                quantum: head.remaining,
            },
            None => Verdict::Idle,
        }
    }
}
