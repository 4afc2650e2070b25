// State representation for Reinforcement Learning
// Turns the configured risk parameters into a discrete, hashable state key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which a parameter or intent pushes the collection outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactType {
    /// Favorable for the creditor
    #[serde(alias = "positive", alias = "POSITIVE")]
    Positive,
    /// Unfavorable for the creditor
    #[serde(alias = "negative", alias = "NEGATIVE")]
    Negative,
    /// No effect either way
    #[serde(alias = "neutral", alias = "NEUTRAL")]
    Neutral,
}

impl ImpactType {
    /// Signed multiplier applied to a normalized magnitude when encoding state
    pub fn state_multiplier(self) -> f64 {
        match self {
            ImpactType::Negative => 1.0,
            ImpactType::Positive => -0.5,
            ImpactType::Neutral => 0.0,
        }
    }
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImpactType::Positive => "Positive",
            ImpactType::Negative => "Negative",
            ImpactType::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

/// A numeric risk parameter supplied once at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    /// Free text, matched case-insensitively against the known categories
    pub name: String,
    pub value: f64,
    #[serde(rename = "type", alias = "impact")]
    pub impact: ImpactType,
}

impl Parameter {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        impact: ImpactType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            impact,
        }
    }

    /// Category resolved from the parameter name
    pub fn category(&self) -> ParameterCategory {
        ParameterCategory::from_name(&self.name)
    }

    /// Value with non-finite input read as zero
    pub(crate) fn finite_value(&self) -> f64 {
        if self.value.is_finite() {
            self.value
        } else {
            0.0
        }
    }
}

/// Known parameter categories with dedicated scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterCategory {
    MissedPayments,
    AmountDue,
    OverdueDays,
    Interest,
    Other,
}

impl ParameterCategory {
    /// Resolve a category from a free-text parameter name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "number of missed payments" | "missed payments" => ParameterCategory::MissedPayments,
            "instalment amount due" | "amount due" => ParameterCategory::AmountDue,
            "days past due" | "overdue days" => ParameterCategory::OverdueDays,
            "outstanding interest" | "interest" => ParameterCategory::Interest,
            _ => ParameterCategory::Other,
        }
    }

    /// Value at which the normalized magnitude saturates at 1
    pub fn state_divisor(self) -> f64 {
        match self {
            ParameterCategory::MissedPayments => 6.0,
            ParameterCategory::AmountDue => 10_000.0,
            ParameterCategory::OverdueDays => 90.0,
            ParameterCategory::Interest => 1_000.0,
            ParameterCategory::Other => 100.0,
        }
    }

    /// Normalized magnitude in [0, 1]
    pub fn normalize(self, value: f64) -> f64 {
        let value = match self {
            // Unmatched names have no known sign convention
            ParameterCategory::Other => value.abs(),
            _ => value,
        };
        (value / self.state_divisor()).clamp(0.0, 1.0)
    }
}

/// Discrete state key: one bin symbol ('0'..'4') per parameter, in order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of parameter bins in the key
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Converts raw parameters into a state key
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEncoder;

impl StateEncoder {
    /// Encode parameters into a state key. Pure: the same list always yields the same key.
    pub fn encode(parameters: &[Parameter]) -> StateKey {
        let key = parameters
            .iter()
            .map(|param| {
                let magnitude = param.category().normalize(param.finite_value());
                Self::bin(magnitude * param.impact.state_multiplier())
            })
            .collect();
        StateKey(key)
    }

    /// Bin a signed impact value into one of five ordinal buckets
    pub fn bin(value: f64) -> char {
        if value <= -0.3 {
            '0'
        } else if value <= -0.1 {
            '1'
        } else if value <= 0.1 {
            '2'
        } else if value <= 0.5 {
            '3'
        } else {
            '4'
        }
    }
}
