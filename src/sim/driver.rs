use crate::core::{ArrivalFeeder, Engine, Process, SchedEvent};
use crate::error::SimError;
use crate::policy::{Dispatcher, Policy};

/// Everything a run produces: completed processes in completion order, plus
/// the per-decision event log for external reporting.
#[derive(Debug)]
pub struct SimOutcome {
    pub completed: Vec<Process>,
    pub events: Vec<SchedEvent>,
}

impl SimOutcome {
    /// Completed processes sorted by id, for stable reporting.
    pub fn by_id(&self) -> Vec<&Process> {
        let mut procs: Vec<&Process> = self.completed.iter().collect();
        procs.sort_by_key(|p| p.id);
        procs
    }
}

/// Run one workload under one policy: spawn an arrival feeder per process
/// and the policy's dispatcher, then drive the engine until every process
/// has completed. The workload is consumed; rerunning a policy needs a
/// fresh copy.
pub fn simulate<P: Policy>(workload: Vec<Process>, policy: P) -> Result<SimOutcome, SimError> {
    for proc in &workload {
        if proc.burst == 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "process {} has a zero burst time",
                proc.id
            )));
        }
    }

    let total = workload.len();
    let dispatcher = Dispatcher::new(policy, total)?;

    let mut engine = Engine::new(total);
    // Feeders first: arrivals coinciding with a scheduling decision land in
    // the queue before the policy looks at it.
    for proc in workload {
        engine.spawn(ArrivalFeeder::new(proc));
    }
    engine.spawn(dispatcher);
    engine.run()?;

    let ctx = engine.into_ctx();
    Ok(SimOutcome {
        completed: ctx.completed,
        events: ctx.events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Fcfs;

    #[test]
    fn empty_workload_is_invalid() {
        assert!(matches!(
            simulate(Vec::new(), Fcfs),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_burst_is_invalid() {
        let workload = vec![Process::new(1, 0, 0, 1)];
        assert!(matches!(
            simulate(workload, Fcfs),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
}
