use serde::{Deserialize, Serialize};

use crate::reinforcement::state::ImpactType;

/// Id carried by intents synthesized for replies outside the catalog
pub const UNKNOWN_INTENT_ID: &str = "unknown";

/// Name used when no intent could be identified at all
pub const UNKNOWN_INTENT_NAME: &str = "Unknown";

/// A customer intent from the configured catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", alias = "impact")]
    pub impact: ImpactType,
    #[serde(default)]
    pub description: String,
    /// Informational only; the engine never reads it
    #[serde(default)]
    pub value: f64,
}

impl Intent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        impact: ImpactType,
        description: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            impact,
            description: description.into(),
            value,
        }
    }

    /// Neutral placeholder for a reply that matched nothing in the catalog
    pub fn unknown(name: Option<&str>, description: &str) -> Self {
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_INTENT_NAME.to_string(),
        };
        Self::new(UNKNOWN_INTENT_ID, name, ImpactType::Neutral, description, 0.0)
    }

    /// Whether this intent was synthesized rather than taken from the catalog
    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_INTENT_ID
    }
}

/// Case-insensitive exact name lookup in the catalog
pub fn find_intent<'a>(catalog: &'a [Intent], name: &str) -> Option<&'a Intent> {
    let name = name.trim().to_lowercase();
    catalog
        .iter()
        .find(|intent| intent.name.trim().to_lowercase() == name)
}

/// An intent with the classifier's confidence in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedIntent {
    #[serde(flatten)]
    pub intent: Intent,
    pub confidence: f64,
}

impl ClassifiedIntent {
    pub fn new(intent: Intent, confidence: f64) -> Self {
        Self { intent, confidence }
    }

    pub fn unknown(name: Option<&str>, description: &str, confidence: f64) -> Self {
        Self::new(Intent::unknown(name, description), confidence)
    }

    pub fn name(&self) -> &str {
        &self.intent.name
    }

    pub fn impact(&self) -> ImpactType {
        self.intent.impact
    }

    pub fn is_unknown(&self) -> bool {
        self.intent.is_unknown()
    }
}
