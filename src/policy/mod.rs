pub mod adaptive;
pub mod dispatcher;
pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::core::{Process, ProcessId, ReadyQueue, Ticks};

pub use adaptive::{AdaptivePolicy, Agent, AgentConfig};
pub use dispatcher::Dispatcher;
pub use fcfs::Fcfs;
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

/// What the policy wants done at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Pull the process at `index` out of the ready queue and run it for
    /// `quantum` ticks. If a process is already on the CPU it is preempted
    /// back to the ready queue first.
    Dispatch { index: usize, quantum: Ticks },
    /// Keep the process already on the CPU for another `quantum` ticks.
    Continue { quantum: Ticks },
    /// Nothing runnable; idle for one tick.
    Idle,
}

/// Result of one executed quantum, fed back to the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumOutcome {
    pub pid: ProcessId,
    pub executed: Ticks,
    pub completed: bool,
}

/// A scheduling policy: a deterministic (or learned) ranking over the ready
/// queue plus a quantum rule. The shared [`Dispatcher`] loop owns the CPU
/// slot and all process bookkeeping; policies only decide.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Called at every decision point: queue contents, the process currently
    /// holding the CPU (preemptive policies only), and the clock.
    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, now: Ticks) -> Verdict;

    /// Whether an unfinished process stays on the CPU after its quantum
    /// instead of returning to the ready queue. SRTF holds; everyone else
    /// re-enqueues at the tail.
    fn holds_cpu(&self) -> bool {
        false
    }

    /// Feedback hook invoked after every executed quantum, with the queue as
    /// left after any re-enqueue. Deterministic policies ignore it; the
    /// adaptive policy learns from it.
    fn observe(&mut self, _outcome: &QuantumOutcome, _queue: &ReadyQueue, _now: Ticks) {}
}
