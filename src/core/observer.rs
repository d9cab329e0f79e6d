use super::state::SimCtx;

#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert!(
            ctx.completed.len() <= ctx.total,
            "Completed count {} exceeds declared total {}",
            ctx.completed.len(),
            ctx.total
        );

        for proc in ctx.ready.iter() {
            debug_assert!(
                proc.remaining > 0 && proc.remaining <= proc.burst,
                "Ready process {} remaining {} out of (0, {}]",
                proc.id,
                proc.remaining,
                proc.burst
            );
            debug_assert!(
                proc.completion.is_none(),
                "Completed process {} still present in ready queue",
                proc.id
            );
            debug_assert_eq!(
                proc.executed(),
                proc.burst - proc.remaining,
                "Process {} timeline out of sync with remaining time",
                proc.id
            );
        }

        for proc in &ctx.completed {
            debug_assert_eq!(
                proc.remaining, 0,
                "Completed process {} has remaining time",
                proc.id
            );
            let (start, completion) = (proc.start, proc.completion);
            debug_assert!(
                start.is_some() && completion.is_some() && start <= completion,
                "Completed process {} missing or inverted start/completion",
                proc.id
            );
            debug_assert_eq!(
                proc.waiting,
                proc.turnaround - proc.burst,
                "Process {} waiting/turnaround/burst mismatch",
                proc.id
            );
            debug_assert_eq!(
                proc.executed(),
                proc.burst,
                "Process {} timeline does not cover its burst",
                proc.id
            );
            debug_assert!(
                proc.timeline.windows(2).all(|w| w[0].start + w[0].len <= w[1].start),
                "Process {} timeline segments overlap or are unsorted",
                proc.id
            );
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
