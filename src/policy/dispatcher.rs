use super::{Policy, QuantumOutcome, Verdict};
use crate::core::{Activity, Process, SchedEvent, Segment, SimCtx, Step, Ticks};
use crate::error::SimError;

enum Phase {
    Deciding,
    Executing { quantum: Ticks },
}

/// The repeating scheduling loop shared by every policy: consult the policy,
/// move the chosen process onto the CPU, let the clock advance by the granted
/// quantum, then account for the elapsed time: completing, re-enqueueing or
/// holding the process as appropriate. Terminates once the completed count
/// reaches the total declared at construction.
pub struct Dispatcher<P: Policy> {
    policy: P,
    current: Option<Process>,
    phase: Phase,
}

impl<P: Policy> Dispatcher<P> {
    pub fn new(policy: P, total: usize) -> Result<Self, SimError> {
        if total == 0 {
            return Err(SimError::InvalidConfiguration(
                "cannot schedule an empty workload".into(),
            ));
        }
        Ok(Self {
            policy,
            current: None,
            phase: Phase::Deciding,
        })
    }

    fn dispatch(&mut self, ctx: &mut SimCtx, index: usize, quantum: Ticks) -> Result<(), SimError> {
        let mut proc = ctx.ready.remove(index).ok_or_else(|| {
            SimError::InvariantViolation(format!(
                "{} selected queue index {index} out of bounds",
                self.policy.name()
            ))
        })?;
        if proc.is_completed() || proc.remaining == 0 {
            return Err(SimError::InvariantViolation(format!(
                "{} selected completed process {}",
                self.policy.name(),
                proc.id
            )));
        }
        if quantum == 0 || quantum > proc.remaining {
            return Err(SimError::InvariantViolation(format!(
                "{} granted quantum {quantum} outside (0, {}] for process {}",
                self.policy.name(),
                proc.remaining,
                proc.id
            )));
        }

        if let Some(prev) = self.current.take() {
            log::debug!(
                "t={}: process {} preempted by {}",
                ctx.now,
                prev.id,
                proc.id
            );
            ctx.emit(SchedEvent::Preempt {
                time: ctx.now,
                preempted: prev.id,
                by: proc.id,
            });
            ctx.ready.push_back(prev);
        }

        // First dispatch stamps start/response exactly once, no matter how
        // often the process is later preempted and resumed.
        if proc.start.is_none() {
            proc.start = Some(ctx.now);
            proc.response = Some(ctx.now - proc.arrival);
        }
        proc.timeline.push(Segment {
            start: ctx.now,
            len: 0,
        });

        log::debug!(
            "t={}: process {} runs for {} ticks ({})",
            ctx.now,
            proc.id,
            quantum,
            self.policy.name()
        );
        ctx.emit(SchedEvent::Dispatch {
            time: ctx.now,
            pid: proc.id,
            quantum,
            policy: self.policy.name(),
        });
        self.current = Some(proc);
        Ok(())
    }

    fn account(&mut self, ctx: &mut SimCtx, quantum: Ticks) -> Result<(), SimError> {
        let mut proc = self.current.take().ok_or_else(|| {
            SimError::InvariantViolation("quantum elapsed with no process on the CPU".into())
        })?;

        proc.remaining = proc.remaining.checked_sub(quantum).ok_or_else(|| {
            SimError::InvariantViolation(format!(
                "process {} remaining time would go negative",
                proc.id
            ))
        })?;
        let segment = proc.timeline.last_mut().ok_or_else(|| {
            SimError::InvariantViolation(format!("process {} ran without a timeline segment", proc.id))
        })?;
        segment.len += quantum;

        let outcome = QuantumOutcome {
            pid: proc.id,
            executed: quantum,
            completed: proc.remaining == 0,
        };

        if proc.remaining == 0 {
            proc.completion = Some(ctx.now);
            proc.turnaround = ctx.now - proc.arrival;
            proc.waiting = proc.turnaround - proc.burst;
            log::debug!(
                "t={}: process {} finishes ({})",
                ctx.now,
                proc.id,
                self.policy.name()
            );
            ctx.emit(SchedEvent::Completion {
                time: ctx.now,
                pid: proc.id,
            });
            ctx.completed.push(proc);
        } else if self.policy.holds_cpu() {
            self.current = Some(proc);
        } else {
            ctx.ready.push_back(proc);
        }

        self.policy.observe(&outcome, &ctx.ready, ctx.now);
        Ok(())
    }
}

impl<P: Policy> Activity for Dispatcher<P> {
    fn step(&mut self, ctx: &mut SimCtx) -> Result<Step, SimError> {
        // Decisions chain at the same instant without yielding; only an
        // executing quantum or an empty queue suspends the loop.
        loop {
            match self.phase {
                Phase::Deciding => {
                    if ctx.all_completed() {
                        return Ok(Step::Done);
                    }
                    match self.policy.decide(&ctx.ready, self.current.as_ref(), ctx.now) {
                        Verdict::Idle => return Ok(Step::Idle),
                        Verdict::Dispatch { index, quantum } => {
                            self.dispatch(ctx, index, quantum)?;
                            self.phase = Phase::Executing { quantum };
                            return Ok(Step::Sleep(quantum));
                        }
                        Verdict::Continue { quantum } => {
                            let proc = self.current.as_ref().ok_or_else(|| {
                                SimError::InvariantViolation(format!(
                                    "{} continued with an empty CPU slot",
                                    self.policy.name()
                                ))
                            })?;
                            if quantum == 0 || quantum > proc.remaining {
                                return Err(SimError::InvariantViolation(format!(
                                    "{} granted quantum {quantum} outside (0, {}] for process {}",
                                    self.policy.name(),
                                    proc.remaining,
                                    proc.id
                                )));
                            }
                            self.phase = Phase::Executing { quantum };
                            return Ok(Step::Sleep(quantum));
                        }
                    }
                }
                Phase::Executing { quantum } => {
                    self.account(ctx, quantum)?;
                    self.phase = Phase::Deciding;
                }
            }
        }
    }
}
