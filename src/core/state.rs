use std::collections::VecDeque;

use super::event::SchedEvent;

pub type ProcessId = u64;
pub type Ticks = u64;
pub type Priority = u32;

/// One contiguous stretch of CPU time granted to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Ticks,
    pub len: Ticks,
}

/// Workload descriptor plus mutable runtime state. The static fields
/// (`arrival`, `burst`, `priority`) never change after construction; the
/// rest is filled in as the simulation dispatches and completes the process.
#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub remaining: Ticks,
    pub start: Option<Ticks>,
    pub completion: Option<Ticks>,
    pub response: Option<Ticks>,
    pub waiting: Ticks,
    pub turnaround: Ticks,
    pub timeline: Vec<Segment>,
}

impl Process {
    pub fn new(id: ProcessId, arrival: Ticks, burst: Ticks, priority: Priority) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority,
            remaining: burst,
            start: None,
            completion: None,
            response: None,
            waiting: 0,
            turnaround: 0,
            timeline: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Total CPU time recorded in the timeline.
    pub fn executed(&self) -> Ticks {
        self.timeline.iter().map(|s| s.len).sum()
    }
}

/// Processes that have arrived but are not on the CPU. Arrival feeders
/// append; the active policy is the sole remover. FIFO order is insertion
/// order, which makes queue position a meaningful tie-breaker.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    procs: VecDeque<Process>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    pub fn push_back(&mut self, proc: Process) {
        self.procs.push_back(proc);
    }

    pub fn get(&self, index: usize) -> Option<&Process> {
        self.procs.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Process> {
        self.procs.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.procs.iter()
    }

    /// Index of the first process with the minimal key. Unlike
    /// `Iterator::min_by_key` (which keeps the last minimum), ties resolve
    /// to the earliest queue position.
    pub fn position_min_by_key<K: Ord>(&self, mut key: impl FnMut(&Process) -> K) -> Option<usize> {
        let mut best: Option<(usize, K)> = None;
        for (i, proc) in self.procs.iter().enumerate() {
            let k = key(proc);
            match &best {
                Some((_, min)) if *min <= k => {}
                _ => best = Some((i, k)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Shared per-run state every activity steps against. Owned by the engine;
/// exactly one run owns its clock, ready queue and completed collection.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub ready: ReadyQueue,
    pub completed: Vec<Process>,
    pub total: usize,
    pub events: Vec<SchedEvent>,
}

impl SimCtx {
    pub fn new(total: usize) -> Self {
        Self {
            now: 0,
            ready: ReadyQueue::new(),
            completed: Vec::new(),
            total,
            events: Vec::new(),
        }
    }

    pub fn all_completed(&self) -> bool {
        self.completed.len() >= self.total
    }

    pub fn emit(&mut self, event: SchedEvent) {
        log::trace!("{event:?}");
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(id: ProcessId, burst: Ticks) -> Process {
        Process::new(id, 0, burst, 1)
    }

    #[test]
    fn position_min_keeps_first_tie() {
        let mut q = ReadyQueue::new();
        q.push_back(proc(1, 5));
        q.push_back(proc(2, 3));
        q.push_back(proc(3, 3));
        assert_eq!(q.position_min_by_key(|p| p.remaining), Some(1));
    }

    #[test]
    fn position_min_empty_queue() {
        let q = ReadyQueue::new();
        assert_eq!(q.position_min_by_key(|p| p.remaining), None);
    }

    #[test]
    fn fresh_process_state() {
        let p = proc(1, 7);
        assert_eq!(p.remaining, 7);
        assert!(p.start.is_none());
        assert!(!p.is_completed());
        assert_eq!(p.executed(), 0);
    }
}
