// HTTP client for the external intent classification service

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::error::{AgentError, AgentResult};

/// Request body: the raw user utterance
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest<'a> {
    pub text: &'a str,
}

/// Best-matching intent reported by the service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BestIntent {
    pub name: String,
    pub confidence: f64,
}

/// Response body of the classification endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifyResponse {
    pub best_intent: BestIntent,
}

/// Client for the classification endpoint
///
/// Exactly one attempt per call; timeouts, non-success statuses and malformed
/// bodies all surface as `AgentError::Classification`.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: Client,
    url: String,
}

impl ClassifierClient {
    pub fn new(base_url: &str, config: &ClassifierConfig) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AgentError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            config.endpoint.trim_start_matches('/')
        );

        Ok(Self { client, url })
    }

    /// Full URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the service for the best-matching intent
    pub async fn classify(&self, text: &str) -> AgentResult<BestIntent> {
        debug!("Sending classification request to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::classification_error(format!(
                "API error: {}",
                status
            )));
        }

        let body = response.text().await?;
        let parsed: ClassifyResponse = serde_json::from_str(&body).map_err(|e| {
            AgentError::classification_error(format!("Malformed classifier response: {}", e))
        })?;

        let confidence = parsed.best_intent.confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AgentError::classification_error(format!(
                "Confidence out of range: {}",
                confidence
            )));
        }

        Ok(parsed.best_intent)
    }
}
