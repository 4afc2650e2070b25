// Main module for Reinforcement Learning components
// State encoding, strategy catalog, Q-table, action selection and reward

pub mod action;
pub mod policy;
pub mod q_learning;
pub mod reward;
pub mod severity;
pub mod state;

// Re-export main components for easier access
pub use action::{Strategy, STRATEGY_COUNT};
pub use policy::EpsilonGreedyPolicy;
pub use q_learning::{QLearningSystem, QTable};
pub use reward::calculate_reward;
pub use severity::SeverityEstimator;
pub use state::{ImpactType, Parameter, ParameterCategory, StateEncoder, StateKey};

use rand::RngCore;

/// Trait defining the interface for a reinforcement learning policy
pub trait Policy {
    /// Selects an action for a given state. Never blocks or performs I/O.
    fn select_action(
        &self,
        table: &QTable,
        state: &StateKey,
        episode: u64,
        rng: &mut dyn RngCore,
    ) -> usize;
}
