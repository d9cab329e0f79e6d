use super::state::{ProcessId, Ticks};

/// Per-decision notifications emitted by the core for external reporting.
/// Notification-only: nothing feeds back into scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Arrival {
        time: Ticks,
        pid: ProcessId,
    },
    Dispatch {
        time: Ticks,
        pid: ProcessId,
        quantum: Ticks,
        policy: &'static str,
    },
    Preempt {
        time: Ticks,
        preempted: ProcessId,
        by: ProcessId,
    },
    Completion {
        time: Ticks,
        pid: ProcessId,
    },
}
