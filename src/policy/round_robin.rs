use super::{Policy, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};
use crate::error::SimError;

/// Round Robin: head of the queue runs for at most one time quantum;
/// unfinished processes re-enter the queue at the tail.
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Result<Self, SimError> {
        if quantum == 0 {
            return Err(SimError::InvalidConfiguration(
                "round robin requires a positive time quantum".into(),
            ));
        }
        Ok(Self { quantum })
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        debug_assert!(running.is_none(), "RR re-enqueues between quanta");
        match queue.get(0) {
            Some(head) => Verdict::Dispatch {
                index: 0,
                quantum: self.quantum.min(head.remaining),
            },
            None => Verdict::Idle,
        }
    }
}
