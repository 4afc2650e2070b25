// Collection agent - a reinforcement learning debt collection dialogue engine
// Picks and adapts a communication strategy from classified customer replies

pub mod agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod reinforcement;
pub mod session;

pub use agent::{create_shared_agent, AgentStats, CollectionAgent, SharedAgent, TurnOutcome};
pub use error::{AgentError, AgentResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
