use super::{Policy, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};

/// Shortest Remaining Time First: preemptive SJF, re-evaluated every single
/// tick. The queue process with the least remaining time displaces the one
/// on the CPU only when strictly shorter; on a tie the running process keeps
/// the CPU and its current timeline segment.
pub struct Srtf;

impl Policy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        let challenger = queue.position_min_by_key(|p| p.remaining);
        match (running, challenger) {
            (None, None) => Verdict::Idle,
            (None, Some(index)) => Verdict::Dispatch { index, quantum: 1 },
            (Some(_), None) => Verdict::Continue { quantum: 1 },
            (Some(current), Some(index)) => {
                let shortest = queue.get(index).map(|p| p.remaining).unwrap_or(Ticks::MAX);
                if shortest < current.remaining {
                    Verdict::Dispatch { index, quantum: 1 }
                } else {
                    Verdict::Continue { quantum: 1 }
                }
            }
        }
    }

    // Between decisions the unfinished process stays on the CPU; it only
    // returns to the queue when actually preempted.
    fn holds_cpu(&self) -> bool {
        true
    }
}
