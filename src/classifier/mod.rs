// Intent classification: remote service with a deterministic keyword fallback

pub mod intent;
pub mod keywords;
pub mod remote;

pub use intent::{find_intent, ClassifiedIntent, Intent, UNKNOWN_INTENT_NAME};
pub use keywords::fallback_classify;
pub use remote::ClassifierClient;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::error::AgentResult;
use crate::log_warn;

/// Resolves free text to an intent of the catalog
///
/// Implementations must not fail: every failure is recovered into some
/// well-formed classification.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> ClassifiedIntent;
}

/// Keyword-only classifier, used when no service is configured
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    catalog: Vec<Intent>,
}

impl KeywordClassifier {
    pub fn new(catalog: Vec<Intent>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> ClassifiedIntent {
        fallback_classify(text, &self.catalog)
    }
}

/// Remote classifier that falls back to keyword matching on any failure
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: ClassifierClient,
    catalog: Vec<Intent>,
}

impl RemoteClassifier {
    pub fn new(client: ClassifierClient, catalog: Vec<Intent>) -> Self {
        Self { client, catalog }
    }
}

#[async_trait]
impl IntentClassifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> ClassifiedIntent {
        match self.client.classify(text).await {
            Ok(best) => match find_intent(&self.catalog, &best.name) {
                Some(intent) => {
                    debug!(
                        "Classifier matched '{}' with confidence {:.2}",
                        intent.name, best.confidence
                    );
                    ClassifiedIntent::new(intent.clone(), best.confidence)
                }
                None => {
                    info!(
                        "Classifier returned intent '{}' outside the catalog",
                        best.name
                    );
                    ClassifiedIntent::unknown(Some(&best.name), "Unknown intent", best.confidence)
                }
            },
            Err(e) => {
                log_warn!(e, "Classification service failed, using keyword fallback");
                fallback_classify(text, &self.catalog)
            }
        }
    }
}

/// Build the classifier described by the configuration
///
/// A disabled classifier or a missing base URL yields the keyword classifier.
pub fn build_classifier(
    config: &ClassifierConfig,
    catalog: Vec<Intent>,
) -> AgentResult<Box<dyn IntentClassifier>> {
    match config.resolved_base_url() {
        Some(base_url) if config.enabled => {
            let client = ClassifierClient::new(&base_url, config)?;
            info!("Using classification service at {}", client.url());
            Ok(Box::new(RemoteClassifier::new(client, catalog)))
        }
        _ => {
            info!("No classification service configured, using keyword matching");
            Ok(Box::new(KeywordClassifier::new(catalog)))
        }
    }
}
