// Running totals a front end keeps on top of the per-turn outcomes

use serde::Serialize;

use crate::agent::TurnOutcome;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub current_reward: f64,
    pub total_reward: f64,
    pub strategy_changes: u64,
    pub episodes: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one processed turn into the totals
    pub fn record(&mut self, outcome: &TurnOutcome) {
        self.current_reward = outcome.reward;
        self.total_reward += outcome.reward;
        if outcome.strategy_changed {
            self.strategy_changes += 1;
        }
        self.episodes += 1;
    }

    pub fn average_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }
}
