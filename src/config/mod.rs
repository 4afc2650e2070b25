// Configuration module for the collection agent
// Learning hyper-parameters, classifier endpoint and the session catalog

#[allow(clippy::module_inception)]
pub mod config;
pub mod session;

// Re-export main types for easier access
pub use config::{
    AgentConfig, ClassifierConfig, ConfigFormat, LearningConfig, CLASSIFIER_URL_ENV,
};
pub use session::SessionConfig;
