use super::activity::{Activity, Step};
use super::event::SchedEvent;
use super::state::{Process, SimCtx};
use crate::error::SimError;

/// One per process: sleeps until the process's arrival time, appends it to
/// the ready queue, and terminates. No side effects before the wait elapses,
/// no retries after the single insertion.
pub struct ArrivalFeeder {
    proc: Option<Process>,
}

impl ArrivalFeeder {
    pub fn new(proc: Process) -> Self {
        Self { proc: Some(proc) }
    }
}

impl Activity for ArrivalFeeder {
    fn step(&mut self, ctx: &mut SimCtx) -> Result<Step, SimError> {
        let Some(proc) = self.proc.take() else {
            return Err(SimError::InvariantViolation(
                "arrival feeder resumed after insertion".into(),
            ));
        };

        if ctx.now < proc.arrival {
            let delta = proc.arrival - ctx.now;
            self.proc = Some(proc);
            return Ok(Step::Sleep(delta));
        }

        log::debug!("t={}: process {} arrives", ctx.now, proc.id);
        ctx.emit(SchedEvent::Arrival {
            time: ctx.now,
            pid: proc.id,
        });
        ctx.ready.push_back(proc);
        Ok(Step::Done)
    }
}
