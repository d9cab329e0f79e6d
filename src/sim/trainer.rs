use super::driver::{simulate, SimOutcome};
use super::metrics::{average_turnaround, average_waiting};
use super::workload::generate_processes;
use crate::core::Ticks;
use crate::error::SimError;
use crate::policy::{AdaptivePolicy, Agent};

#[derive(Debug, Clone, Copy)]
pub struct TrainingConfig {
    pub episodes: usize,
    pub procs_per_episode: usize,
    pub quantum: Ticks,
    /// Base seed; episode `i` draws its workload from `seed + i`.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 200,
            procs_per_episode: 8,
            quantum: 3,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EpisodeStats {
    pub episode: usize,
    /// Exploration rate in effect while the episode ran.
    pub epsilon: f64,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
}

/// Run `episodes` independent simulations against one shared agent: fresh
/// workload and ready queue each time, shared value table, exploration rate
/// annealed between episodes. A failing episode aborts the whole procedure;
/// skipping it would bias what the table gets exposed to.
pub fn train(agent: &mut Agent, cfg: &TrainingConfig) -> Result<Vec<EpisodeStats>, SimError> {
    if cfg.episodes == 0 || cfg.procs_per_episode == 0 {
        return Err(SimError::InvalidConfiguration(
            "training requires at least one episode and one process per episode".into(),
        ));
    }

    let mut stats = Vec::with_capacity(cfg.episodes);
    for episode in 0..cfg.episodes {
        let workload =
            generate_processes(cfg.procs_per_episode, cfg.seed.wrapping_add(episode as u64));
        let epsilon = agent.epsilon();
        let policy = AdaptivePolicy::new(agent, cfg.quantum)?;
        let outcome = simulate(workload, policy)?;
        stats.push(EpisodeStats {
            episode,
            epsilon,
            avg_waiting: average_waiting(&outcome.completed),
            avg_turnaround: average_turnaround(&outcome.completed),
        });
        agent.anneal();
        log::debug!(
            "episode {episode}: epsilon={epsilon:.3} avg_waiting={:.2}",
            stats[episode].avg_waiting
        );
    }
    Ok(stats)
}

/// One exploitation run against a trained agent: the value table keeps
/// updating online, but the exploration rate is left un-annealed.
pub fn evaluate(
    agent: &mut Agent,
    workload: Vec<crate::core::Process>,
    quantum: Ticks,
) -> Result<SimOutcome, SimError> {
    let policy = AdaptivePolicy::new(agent, quantum)?;
    simulate(workload, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AgentConfig;

    #[test]
    fn zero_episode_training_is_invalid() {
        let mut agent = Agent::new(AgentConfig::default()).unwrap();
        let cfg = TrainingConfig {
            episodes: 0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            train(&mut agent, &cfg),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
}
