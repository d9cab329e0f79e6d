use keyed_priority_queue::KeyedPriorityQueue;

use super::activity::{Activity, Step};
use super::observer::Observer;
use super::state::{SimCtx, Ticks};
use crate::error::SimError;

// Index into the activity Vec; also the tie-break rank for coincident wakes.
pub type ActivityId = usize;

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
struct Wake {
    time: Ticks,
    seq: ActivityId,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Wake's Ord:
// earliest time pops first, registration order on ties.
impl PartialOrd for Wake {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wake {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded cooperative event engine. Activities suspend on virtual
/// wake times; the engine advances the clock to the next pending wake and
/// resumes due activities one at a time, serialized even when wake times
/// coincide.
pub struct Engine<'a> {
    ctx: SimCtx,
    activities: Vec<Box<dyn Activity + 'a>>,
    pending: KeyedPriorityQueue<ActivityId, Wake>,
    idle: Vec<bool>,
    idle_count: usize,
    observer: Observer,
}

impl<'a> Engine<'a> {
    pub fn new(total: usize) -> Self {
        Self {
            ctx: SimCtx::new(total),
            activities: Vec::new(),
            pending: KeyedPriorityQueue::new(),
            idle: Vec::new(),
            idle_count: 0,
            observer: Observer::new(),
        }
    }

    /// Register an activity, due immediately. Registration order decides
    /// resumption order among coincident wake times, which keeps runs
    /// reproducible.
    pub fn spawn(&mut self, activity: impl Activity + 'a) -> ActivityId {
        let id = self.activities.len();
        self.activities.push(Box::new(activity));
        self.idle.push(false);
        self.pending.push(
            id,
            Wake {
                time: self.ctx.now,
                seq: id,
            },
        );
        id
    }

    pub fn ctx(&self) -> &SimCtx {
        &self.ctx
    }

    pub fn into_ctx(self) -> SimCtx {
        self.ctx
    }

    /// Drive all activities to termination. Fails with `SimulationStalled`
    /// when every remaining activity is idling: an idle step means the
    /// activity saw nothing actionable, so once the whole pending set is
    /// idle no wake can ever change the shared state again.
    pub fn run(&mut self) -> Result<(), SimError> {
        while let Some((id, wake)) = self.pending.pop() {
            if wake.time > self.ctx.now {
                self.ctx.now = wake.time;
            }
            if self.idle[id] {
                self.idle[id] = false;
                self.idle_count -= 1;
            }

            let step = self.activities[id].step(&mut self.ctx)?;
            self.observer.observe(&self.ctx);

            match step {
                Step::Done => {}
                Step::Sleep(delta) => {
                    self.pending.push(
                        id,
                        Wake {
                            time: self.ctx.now.saturating_add(delta),
                            seq: id,
                        },
                    );
                }
                Step::Idle => {
                    self.pending.push(
                        id,
                        Wake {
                            time: self.ctx.now.saturating_add(1),
                            seq: id,
                        },
                    );
                    self.idle[id] = true;
                    self.idle_count += 1;
                    if self.idle_count == self.pending.len() {
                        log::debug!(
                            "stall detected at t={}: all {} pending activities idle",
                            self.ctx.now,
                            self.idle_count
                        );
                        return Err(SimError::SimulationStalled {
                            now: self.ctx.now,
                            completed: self.ctx.completed.len(),
                            total: self.ctx.total,
                        });
                    }
                }
            }
        }

        if !self.ctx.all_completed() {
            return Err(SimError::SimulationStalled {
                now: self.ctx.now,
                completed: self.ctx.completed.len(),
                total: self.ctx.total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Beeper {
        tag: u32,
        wakes: Vec<Ticks>,
        log: Rc<RefCell<Vec<(Ticks, u32)>>>,
        at: usize,
    }

    impl Activity for Beeper {
        fn step(&mut self, ctx: &mut SimCtx) -> Result<Step, SimError> {
            if self.at > 0 {
                self.log.borrow_mut().push((ctx.now, self.tag));
            }
            match self.wakes.get(self.at) {
                Some(&t) => {
                    self.at += 1;
                    Ok(Step::Sleep(t.saturating_sub(ctx.now)))
                }
                None => Ok(Step::Done),
            }
        }
    }

    #[test]
    fn coincident_wakes_resume_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new(0);
        // Both beepers wake at the same instants.
        engine.spawn(Beeper {
            tag: 1,
            wakes: vec![3, 5],
            log: Rc::clone(&log),
            at: 0,
        });
        engine.spawn(Beeper {
            tag: 2,
            wakes: vec![3, 5],
            log: Rc::clone(&log),
            at: 0,
        });
        engine.run().unwrap();
        assert_eq!(*log.borrow(), vec![(3, 1), (3, 2), (5, 1), (5, 2)]);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new(0);
        engine.spawn(Beeper {
            tag: 1,
            wakes: vec![10, 10, 12],
            log: Rc::clone(&log),
            at: 0,
        });
        engine.run().unwrap();
        let times: Vec<Ticks> = log.borrow().iter().map(|&(t, _)| t).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    struct Lazy;

    impl Activity for Lazy {
        fn step(&mut self, _ctx: &mut SimCtx) -> Result<Step, SimError> {
            Ok(Step::Idle)
        }
    }

    #[test]
    fn all_idle_activities_stall_the_engine() {
        let mut engine = Engine::new(1);
        engine.spawn(Lazy);
        match engine.run() {
            Err(SimError::SimulationStalled {
                completed, total, ..
            }) => {
                assert_eq!(completed, 0);
                assert_eq!(total, 1);
            }
            other => panic!("expected stall, got {other:?}"),
        }
    }

    #[test]
    fn unmet_predicate_after_drain_is_a_stall() {
        // No activities at all, but one process was promised.
        let mut engine = Engine::new(1);
        assert!(matches!(
            engine.run(),
            Err(SimError::SimulationStalled { .. })
        ));
    }
}
