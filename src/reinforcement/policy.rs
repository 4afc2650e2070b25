// Epsilon-greedy action selection with time-decayed exploration

use rand::{Rng, RngCore};

use crate::config::LearningConfig;
use crate::reinforcement::q_learning::QTable;
use crate::reinforcement::state::StateKey;
use crate::reinforcement::Policy;

/// Epsilon-greedy selector whose exploration rate decays with the episode count
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedyPolicy {
    /// Exploration rate (ε0) at episode 0
    exploration_rate: f64,
    /// Episodes per e-fold of decay
    decay_episodes: f64,
}

impl EpsilonGreedyPolicy {
    pub fn new(exploration_rate: f64, decay_episodes: f64) -> Self {
        Self {
            exploration_rate: exploration_rate.clamp(0.0, 1.0),
            decay_episodes: decay_episodes.max(f64::EPSILON),
        }
    }

    pub fn from_config(config: &LearningConfig) -> Self {
        Self::new(config.exploration_rate, config.exploration_decay_episodes)
    }

    /// `ε0 · exp(-episode / decay_episodes)`; non-increasing in `episode`
    pub fn decayed_exploration_rate(&self, episode: u64) -> f64 {
        self.exploration_rate * (-(episode as f64) / self.decay_episodes).exp()
    }
}

impl Default for EpsilonGreedyPolicy {
    fn default() -> Self {
        Self::from_config(&LearningConfig::default())
    }
}

impl Policy for EpsilonGreedyPolicy {
    fn select_action(
        &self,
        table: &QTable,
        state: &StateKey,
        episode: u64,
        rng: &mut dyn RngCore,
    ) -> usize {
        let action_count = table.action_count();
        if action_count == 0 {
            return 0;
        }

        // Exploration: uniform over the full catalog
        if rng.random::<f64>() < self.decayed_exploration_rate(episode) {
            return rng.random_range(0..action_count);
        }

        table.best_action(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table_with(values: &[f64], state: &StateKey) -> QTable {
        let mut table = QTable::new(values.len());
        for (action, value) in values.iter().enumerate() {
            table.set(state, action, *value);
        }
        table
    }

    #[test]
    fn test_exploitation_returns_first_maximum() {
        let state = StateKey::from("3");
        let table = table_with(&[0.2, 0.5, 0.5, 0.1], &state);
        let policy = EpsilonGreedyPolicy::new(0.0, 100.0);
        let mut rng = StdRng::seed_from_u64(1);

        for episode in 0..20 {
            assert_eq!(policy.select_action(&table, &state, episode, &mut rng), 1);
        }
    }

    #[test]
    fn test_full_exploration_covers_catalog() {
        let state = StateKey::from("3");
        let table = table_with(&[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0], &state);
        let policy = EpsilonGreedyPolicy::new(1.0, f64::MAX);
        let mut rng = StdRng::seed_from_u64(9);

        let mut seen = [false; 7];
        for _ in 0..500 {
            let action = policy.select_action(&table, &state, 0, &mut rng);
            assert!(action < 7);
            seen[action] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_exploration_rate_decay() {
        let policy = EpsilonGreedyPolicy::default();
        assert!((policy.decayed_exploration_rate(0) - 0.3).abs() < 1e-12);
        assert!((policy.decayed_exploration_rate(100) - 0.3 * (-1.0f64).exp()).abs() < 1e-12);

        let mut previous = f64::INFINITY;
        for episode in 0..1_000 {
            let rate = policy.decayed_exploration_rate(episode);
            assert!(rate <= previous);
            previous = rate;
        }
    }
}
