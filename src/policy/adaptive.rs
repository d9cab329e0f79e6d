use rand::prelude::*;
use rustc_hash::FxHashMap;

use super::{Policy, QuantumOutcome, Verdict};
use crate::core::{Process, ReadyQueue, Ticks};
use crate::error::SimError;

/// Granted on top of the per-tick penalty when a quantum finishes a process.
const COMPLETION_BONUS: f64 = 10.0;

/// Discretized summary of the ready queue: how many processes are waiting
/// and the mean of their remaining times, rounded to the nearest tick.
/// Coarse enough to recur across episodes, fine enough to tell a long queue
/// of short jobs from a short queue of long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QState {
    pub len: usize,
    pub mean_remaining: Ticks,
}

impl QState {
    pub fn of(queue: &ReadyQueue) -> Self {
        let len = queue.len();
        let mean_remaining = if len == 0 {
            0
        } else {
            let sum: Ticks = queue.iter().map(|p| p.remaining).sum();
            (sum + len as Ticks / 2) / len as Ticks
        };
        Self {
            len,
            mean_remaining,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Initial exploration rate.
    pub epsilon: f64,
    /// Exploration floor.
    pub epsilon_min: f64,
    /// Multiplicative exploration decay applied between episodes.
    pub epsilon_decay: f64,
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 1.0,
            epsilon_min: 0.05,
            epsilon_decay: 0.97,
            seed: 0,
        }
    }
}

/// Tabular reward-driven learner. The value table maps (queue state, action
/// rank) to an estimate, grows as new states are observed and is shared
/// across every episode of a training session. An action is a rank into the
/// ready queue ordered by ascending remaining time, valid only for the queue
/// size seen at selection.
pub struct Agent {
    table: FxHashMap<(QState, usize), f64>,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    epsilon_min: f64,
    epsilon_decay: f64,
    rng: StdRng,
}

impl Agent {
    pub fn new(cfg: AgentConfig) -> Result<Self, SimError> {
        if !(cfg.alpha > 0.0 && cfg.alpha <= 1.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "learning rate {} outside (0, 1]",
                cfg.alpha
            )));
        }
        if !(0.0..=1.0).contains(&cfg.gamma) {
            return Err(SimError::InvalidConfiguration(format!(
                "discount factor {} outside [0, 1]",
                cfg.gamma
            )));
        }
        if !(0.0..=1.0).contains(&cfg.epsilon) || !(0.0..=cfg.epsilon).contains(&cfg.epsilon_min) {
            return Err(SimError::InvalidConfiguration(format!(
                "exploration rate {} / floor {} out of range",
                cfg.epsilon, cfg.epsilon_min
            )));
        }
        if !(cfg.epsilon_decay > 0.0 && cfg.epsilon_decay <= 1.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "exploration decay {} outside (0, 1]",
                cfg.epsilon_decay
            )));
        }
        Ok(Self {
            table: FxHashMap::default(),
            alpha: cfg.alpha,
            gamma: cfg.gamma,
            epsilon: cfg.epsilon,
            epsilon_min: cfg.epsilon_min,
            epsilon_decay: cfg.epsilon_decay,
            rng: StdRng::seed_from_u64(cfg.seed),
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    fn q(&self, state: QState, action: usize) -> f64 {
        self.table.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// ε-greedy selection over `actions` ranks; `None` when no action is
    /// eligible. Ties among maximal values break uniformly at random.
    pub fn choose(&mut self, state: QState, actions: usize) -> Option<usize> {
        if actions == 0 {
            return None;
        }
        if self.rng.random::<f64>() < self.epsilon {
            return Some(self.rng.random_range(0..actions));
        }
        let mut best = f64::NEG_INFINITY;
        let mut maximal: Vec<usize> = Vec::new();
        for action in 0..actions {
            let q = self.q(state, action);
            if q > best {
                best = q;
                maximal.clear();
                maximal.push(action);
            } else if q == best {
                maximal.push(action);
            }
        }
        Some(maximal[self.rng.random_range(0..maximal.len())])
    }

    /// One temporal-difference update, applied after every quantum: move
    /// Q(state, action) toward reward + γ · max over actions valid in the
    /// next state (0 when the next queue is empty).
    pub fn learn(&mut self, state: QState, action: usize, reward: f64, next: QState) {
        let best_next = (0..next.len)
            .map(|a| self.q(next, a))
            .reduce(f64::max)
            .unwrap_or(0.0);
        let q = self.table.entry((state, action)).or_insert(0.0);
        *q += self.alpha * (reward + self.gamma * best_next - *q);
    }

    /// Between-episode exploration decay, floored at the configured minimum.
    pub fn anneal(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_min);
    }
}

/// Scheduling policy that delegates selection to an [`Agent`]. Runs each
/// chosen process for at most a fixed quantum, re-enqueues it when
/// unfinished, and feeds the observed reward back into the value table.
pub struct AdaptivePolicy<'a> {
    agent: &'a mut Agent,
    quantum: Ticks,
    pending: Option<(QState, usize)>,
}

impl<'a> AdaptivePolicy<'a> {
    pub fn new(agent: &'a mut Agent, quantum: Ticks) -> Result<Self, SimError> {
        if quantum == 0 {
            return Err(SimError::InvalidConfiguration(
                "adaptive policy requires a positive time quantum".into(),
            ));
        }
        Ok(Self {
            agent,
            quantum,
            pending: None,
        })
    }

    /// Map an action rank (ascending remaining time, stable on ties) to the
    /// process's actual queue position.
    fn rank_to_index(queue: &ReadyQueue, rank: usize) -> Option<usize> {
        let mut order: Vec<usize> = (0..queue.len()).collect();
        order.sort_by_key(|&i| queue.get(i).map(|p| p.remaining).unwrap_or(Ticks::MAX));
        order.get(rank).copied()
    }
}

impl Policy for AdaptivePolicy<'_> {
    fn name(&self) -> &'static str {
        "Adaptive"
    }

    fn decide(&mut self, queue: &ReadyQueue, running: Option<&Process>, _now: Ticks) -> Verdict {
        debug_assert!(running.is_none(), "adaptive policy re-enqueues between quanta");
        let state = QState::of(queue);
        let Some(rank) = self.agent.choose(state, queue.len()) else {
            return Verdict::Idle;
        };
        let Some(index) = Self::rank_to_index(queue, rank) else {
            return Verdict::Idle;
        };
        let remaining = queue.get(index).map(|p| p.remaining).unwrap_or(0);
        self.pending = Some((state, rank));
        Verdict::Dispatch {
            index,
            quantum: self.quantum.min(remaining),
        }
    }

    fn observe(&mut self, outcome: &QuantumOutcome, queue: &ReadyQueue, _now: Ticks) {
        let Some((state, action)) = self.pending.take() else {
            return;
        };
        let mut reward = -(outcome.executed as f64);
        if outcome.completed {
            reward += COMPLETION_BONUS;
        }
        self.agent.learn(state, action, reward, QState::of(queue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Process;

    fn queue_of(remaining: &[Ticks]) -> ReadyQueue {
        let mut q = ReadyQueue::new();
        for (i, &r) in remaining.iter().enumerate() {
            q.push_back(Process::new(i as u64 + 1, 0, r, 1));
        }
        q
    }

    #[test]
    fn state_rounds_mean_remaining() {
        let q = queue_of(&[3, 4]);
        // (3 + 4 + 1) / 2 = 4
        assert_eq!(QState::of(&q), QState { len: 2, mean_remaining: 4 });
        assert_eq!(QState::of(&ReadyQueue::new()), QState { len: 0, mean_remaining: 0 });
    }

    #[test]
    fn empty_queue_yields_no_action() {
        let mut agent = Agent::new(AgentConfig::default()).unwrap();
        assert_eq!(agent.choose(QState { len: 0, mean_remaining: 0 }, 0), None);
    }

    #[test]
    fn greedy_choice_picks_highest_value() {
        let mut agent = Agent::new(AgentConfig {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..AgentConfig::default()
        })
        .unwrap();
        let state = QState { len: 3, mean_remaining: 5 };
        agent.table.insert((state, 0), -4.0);
        agent.table.insert((state, 1), 2.0);
        agent.table.insert((state, 2), -1.0);
        for _ in 0..20 {
            assert_eq!(agent.choose(state, 3), Some(1));
        }
    }

    #[test]
    fn greedy_ties_stay_within_maximal_set() {
        let mut agent = Agent::new(AgentConfig {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..AgentConfig::default()
        })
        .unwrap();
        let state = QState { len: 3, mean_remaining: 5 };
        agent.table.insert((state, 0), 1.0);
        agent.table.insert((state, 1), -2.0);
        agent.table.insert((state, 2), 1.0);
        for _ in 0..50 {
            let a = agent.choose(state, 3).unwrap();
            assert!(a == 0 || a == 2);
        }
    }

    #[test]
    fn learn_moves_value_toward_target() {
        let mut agent = Agent::new(AgentConfig {
            alpha: 0.5,
            gamma: 0.9,
            ..AgentConfig::default()
        })
        .unwrap();
        let s = QState { len: 2, mean_remaining: 6 };
        let next = QState { len: 1, mean_remaining: 3 };
        agent.table.insert((next, 0), 4.0);
        agent.learn(s, 1, -3.0, next);
        // 0 + 0.5 * (-3 + 0.9 * 4 - 0) = 0.3
        assert!((agent.q(s, 1) - 0.3).abs() < 1e-12);
        assert_eq!(agent.table_len(), 2);
    }

    #[test]
    fn bootstrap_honors_all_negative_next_values() {
        let mut agent = Agent::new(AgentConfig {
            alpha: 1.0,
            gamma: 1.0,
            ..AgentConfig::default()
        })
        .unwrap();
        let s = QState { len: 2, mean_remaining: 5 };
        let next = QState { len: 2, mean_remaining: 4 };
        agent.table.insert((next, 0), -3.0);
        agent.table.insert((next, 1), -5.0);
        agent.learn(s, 0, -1.0, next);
        // -1 + 1.0 * max(-3, -5); the bootstrap must not be floored at 0.
        assert!((agent.q(s, 0) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn terminal_states_bootstrap_from_zero() {
        let mut agent = Agent::new(AgentConfig {
            alpha: 1.0,
            gamma: 0.9,
            ..AgentConfig::default()
        })
        .unwrap();
        let s = QState { len: 1, mean_remaining: 2 };
        agent.learn(s, 0, -2.0, QState { len: 0, mean_remaining: 0 });
        assert!((agent.q(s, 0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn anneal_decays_to_floor() {
        let mut agent = Agent::new(AgentConfig {
            epsilon: 0.5,
            epsilon_min: 0.4,
            epsilon_decay: 0.5,
            ..AgentConfig::default()
        })
        .unwrap();
        agent.anneal();
        assert!((agent.epsilon() - 0.4).abs() < 1e-12);
        agent.anneal();
        assert!((agent.epsilon() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn bad_hyperparameters_are_rejected() {
        for cfg in [
            AgentConfig { alpha: 0.0, ..AgentConfig::default() },
            AgentConfig { gamma: 1.5, ..AgentConfig::default() },
            AgentConfig { epsilon: 0.1, epsilon_min: 0.2, ..AgentConfig::default() },
            AgentConfig { epsilon_decay: 0.0, ..AgentConfig::default() },
        ] {
            assert!(matches!(
                Agent::new(cfg),
                Err(SimError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn rank_maps_through_ascending_remaining() {
        let mut q = queue_of(&[9, 3, 7]);
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 0), Some(1));
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 1), Some(2));
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 2), Some(0));
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 3), None);
        // Stable on ties: equal remaining keeps queue order.
        q.push_back(Process::new(4, 0, 3, 1));
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 0), Some(1));
        assert_eq!(AdaptivePolicy::rank_to_index(&q, 1), Some(3));
    }
}
