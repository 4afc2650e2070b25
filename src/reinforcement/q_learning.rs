// Q-Learning implementation for the reinforcement learning agent
// Holds the Q-table and applies the temporal-difference update

use rand::Rng;
use std::collections::HashMap;

use crate::config::LearningConfig;
use crate::reinforcement::state::StateKey;

/// Upper bound of the uniform jitter added to every seeded Q-value
const INIT_JITTER: f64 = 0.05;

/// Scale of the distance-based bias toward the estimated starting strategy
const INIT_BIAS: f64 = 0.1;

/// Mapping from (state, action) to a learned value estimate
///
/// Grows lazily: unset keys read as 0.
#[derive(Debug, Clone)]
pub struct QTable {
    values: HashMap<(StateKey, usize), f64>,
    action_count: usize,
}

impl QTable {
    pub fn new(action_count: usize) -> Self {
        Self {
            values: HashMap::new(),
            action_count,
        }
    }

    /// Seed every action of `state` with small jitter biased toward `initial_action`
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        state: &StateKey,
        initial_action: usize,
        rng: &mut R,
    ) {
        for action in 0..self.action_count {
            let distance = action.abs_diff(initial_action) as f64;
            let bias = (-distance / 2.0).exp() * INIT_BIAS;
            let jitter = rng.random_range(0.0..INIT_JITTER);
            self.values.insert((state.clone(), action), jitter + bias);
        }
    }

    /// Value for a state-action pair
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Overwrite the value for a state-action pair
    pub fn set(&mut self, state: &StateKey, action: usize, value: f64) {
        self.values.insert((state.clone(), action), value);
    }

    /// Values of every catalog action for `state`, in action order
    pub fn action_values(&self, state: &StateKey) -> Vec<f64> {
        (0..self.action_count)
            .map(|action| self.get(state, action))
            .collect()
    }

    /// `max_a Q[state, a]` over the full catalog
    pub fn max_value(&self, state: &StateKey) -> f64 {
        if self.action_count == 0 {
            return 0.0;
        }
        self.action_values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the strictly greatest value; ties go to the lowest index
    pub fn best_action(&self, state: &StateKey) -> usize {
        let mut best_action = 0;
        let mut best_value = f64::NEG_INFINITY;

        for (action, value) in self.action_values(state).into_iter().enumerate() {
            if value > best_value {
                best_value = value;
                best_action = action;
            }
        }

        best_action
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Q-Learning system: the table plus its learning hyper-parameters
#[derive(Debug, Clone)]
pub struct QLearningSystem {
    /// Q-table mapping state-action pairs to expected future rewards
    q_table: QTable,
    /// Base learning rate (α) before episode decay
    learning_rate: f64,
    /// Discount factor (γ) - importance of future rewards
    discount_factor: f64,
    /// Episodes over which the learning rate halves
    learning_rate_decay_episodes: f64,
}

impl QLearningSystem {
    pub fn new(action_count: usize, config: &LearningConfig) -> Self {
        Self {
            q_table: QTable::new(action_count),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            learning_rate_decay_episodes: config.learning_rate_decay_episodes.max(f64::EPSILON),
        }
    }

    pub fn table(&self) -> &QTable {
        &self.q_table
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn base_learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// `lr0 / (1 + episode / decay_episodes)`
    pub fn adaptive_learning_rate(&self, episode: u64) -> f64 {
        self.learning_rate / (1.0 + episode as f64 / self.learning_rate_decay_episodes)
    }

    /// Apply one Q-learning step and return the new value
    pub fn update_q_value(
        &mut self,
        state: &StateKey,
        action: usize,
        reward: f64,
        next_state: &StateKey,
        episode: u64,
    ) -> f64 {
        let current_q = self.q_table.get(state, action);
        let max_next_q = self.q_table.max_value(next_state);
        let learning_rate = self.adaptive_learning_rate(episode);

        // Q(s,a) ← Q(s,a) + α[r + γ·max_a' Q(s',a') - Q(s,a)]
        let temporal_difference = reward + self.discount_factor * max_next_q - current_q;
        let new_q = current_q + learning_rate * temporal_difference;

        self.q_table.set(state, action, new_q);
        new_q
    }
}
