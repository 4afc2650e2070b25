// Collection agent: the learning and decision engine behind one conversation
// Owns its Q-table and episode counter; turns are processed strictly in order

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::classifier::{build_classifier, ClassifiedIntent, IntentClassifier};
use crate::config::AgentConfig;
use crate::error::AgentResult;
use crate::reinforcement::{
    calculate_reward, EpsilonGreedyPolicy, Policy, QLearningSystem, QTable, SeverityEstimator,
    StateEncoder, StateKey, Strategy, STRATEGY_COUNT,
};

/// Everything a collaborator needs to display one processed turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub classified_intent: ClassifiedIntent,
    pub reward: f64,
    pub strategy_changed: bool,
    pub new_strategy: Strategy,
    /// Q-value of (state, new strategy) after the update
    pub q_value: f64,
    /// Decayed exploration rate at this episode
    pub epsilon: f64,
}

/// Snapshot of the learning state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStats {
    pub learning_rate: f64,
    pub q_value: f64,
    pub epsilon: f64,
    pub episodes: u64,
    pub state: StateKey,
    pub strategy: Strategy,
}

/// Reinforcement learning agent selecting a collection strategy per turn
pub struct CollectionAgent {
    /// Encoded once from the parameters; never re-observed
    state: StateKey,
    current_action: usize,
    episode_count: u64,
    q_learning: QLearningSystem,
    policy: EpsilonGreedyPolicy,
    classifier: Box<dyn IntentClassifier>,
    rng: StdRng,
}

impl CollectionAgent {
    /// Create an agent with the classifier described by `config.classifier`
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        config.validate()?;
        let classifier = build_classifier(&config.classifier, config.session.intents.clone())?;
        Self::with_classifier(config, classifier)
    }

    /// Create an agent around an already built classifier
    pub fn with_classifier(
        config: &AgentConfig,
        classifier: Box<dyn IntentClassifier>,
    ) -> AgentResult<Self> {
        config.validate()?;

        let parameters = &config.session.parameters;

        let mut rng = match config.learning.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let state = StateEncoder::encode(parameters);
        let initial_action = SeverityEstimator::initial_strategy(parameters, STRATEGY_COUNT);

        let mut q_learning = QLearningSystem::new(STRATEGY_COUNT, &config.learning);
        q_learning
            .table_mut()
            .initialize(&state, initial_action, &mut rng);

        info!(
            "Initialized strategy: {} (state: {}, severity: {:.2})",
            Strategy::ALL[initial_action],
            state,
            SeverityEstimator::average_severity(parameters)
        );

        Ok(Self {
            state,
            current_action: initial_action,
            episode_count: 0,
            q_learning,
            policy: EpsilonGreedyPolicy::from_config(&config.learning),
            classifier,
            rng,
        })
    }

    /// Process one user reply: classify, reward, update, select
    pub async fn process_turn(&mut self, text: &str) -> TurnOutcome {
        self.episode_count += 1;
        let episode = self.episode_count;

        let classified_intent = self.classifier.classify(text).await;
        let reward = calculate_reward(&classified_intent, self.current_action, STRATEGY_COUNT);

        // Parameters are static for the session, so the next state is the current one
        let next_state = self.state.clone();
        self.q_learning
            .update_q_value(&self.state, self.current_action, reward, &next_state, episode);

        let previous_action = self.current_action;
        self.current_action =
            self.policy
                .select_action(self.q_learning.table(), &next_state, episode, &mut self.rng);

        let new_strategy = self.current_strategy();
        let q_value = self.q_learning.table().get(&self.state, self.current_action);
        let epsilon = self.policy.decayed_exploration_rate(episode);

        debug!(
            "Episode {}: intent '{}' ({:.2}), reward {:.3}, strategy {} -> {}, q {:.3}, epsilon {:.3}",
            episode,
            classified_intent.name(),
            classified_intent.confidence,
            reward,
            Strategy::ALL[previous_action],
            new_strategy,
            q_value,
            epsilon
        );

        TurnOutcome {
            classified_intent,
            reward,
            strategy_changed: previous_action != self.current_action,
            new_strategy,
            q_value,
            epsilon,
        }
    }

    /// Current learning statistics
    pub fn stats(&self) -> AgentStats {
        AgentStats {
            learning_rate: self.q_learning.base_learning_rate(),
            q_value: self.q_learning.table().get(&self.state, self.current_action),
            epsilon: self.policy.decayed_exploration_rate(self.episode_count),
            episodes: self.episode_count,
            state: self.state.clone(),
            strategy: self.current_strategy(),
        }
    }

    /// An agent reply in the voice of the current strategy
    pub fn generate_response(&mut self) -> &'static str {
        self.current_strategy().pick_response(&mut self.rng)
    }

    pub fn current_strategy(&self) -> Strategy {
        Strategy::from_index(self.current_action).unwrap_or(Strategy::FriendlyReminder)
    }

    pub fn current_action(&self) -> usize {
        self.current_action
    }

    pub fn state(&self) -> &StateKey {
        &self.state
    }

    pub fn episode_count(&self) -> u64 {
        self.episode_count
    }

    pub fn q_table(&self) -> &QTable {
        self.q_learning.table()
    }

}

/// Handle that serializes turns on one agent
///
/// The lock is held across the whole pipeline, including the classification
/// call, so a second turn waits until the first has updated the Q-table.
#[derive(Clone)]
pub struct SharedAgent {
    inner: Arc<Mutex<CollectionAgent>>,
}

impl SharedAgent {
    pub fn new(agent: CollectionAgent) -> Self {
        Self {
            inner: Arc::new(Mutex::new(agent)),
        }
    }

    pub async fn process_turn(&self, text: &str) -> TurnOutcome {
        let mut agent = self.inner.lock().await;
        agent.process_turn(text).await
    }

    pub async fn stats(&self) -> AgentStats {
        self.inner.lock().await.stats()
    }

    pub async fn generate_response(&self) -> &'static str {
        self.inner.lock().await.generate_response()
    }

    pub async fn current_strategy(&self) -> Strategy {
        self.inner.lock().await.current_strategy()
    }
}

/// Create a shared agent from configuration
pub fn create_shared_agent(config: &AgentConfig) -> AgentResult<SharedAgent> {
    Ok(SharedAgent::new(CollectionAgent::new(config)?))
}
