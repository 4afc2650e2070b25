use serde::{Deserialize, Serialize};

use crate::classifier::Intent;
use crate::error::{AgentError, AgentResult};
use crate::reinforcement::state::{ImpactType, Parameter};

/// Parameters and intent catalog a session starts from; immutable once the agent is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_parameters")]
    pub parameters: Vec<Parameter>,
    #[serde(default = "default_intents")]
    pub intents: Vec<Intent>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            parameters: default_parameters(),
            intents: default_intents(),
        }
    }
}

impl SessionConfig {
    pub fn new(parameters: Vec<Parameter>, intents: Vec<Intent>) -> Self {
        Self {
            parameters,
            intents,
        }
    }

    /// Refuse to start a session without parameters or intents
    pub fn validate(&self) -> AgentResult<()> {
        if self.parameters.is_empty() {
            return Err(AgentError::empty_configuration(
                "at least one parameter is required",
            ));
        }
        if self.intents.is_empty() {
            return Err(AgentError::empty_configuration(
                "at least one intent is required",
            ));
        }
        Ok(())
    }
}

fn default_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("1", "Number of Missed Payments", 3.0, ImpactType::Negative),
        Parameter::new("2", "Instalment Amount Due", 5000.0, ImpactType::Negative),
        Parameter::new("3", "Days Past Due", 15.0, ImpactType::Negative),
        Parameter::new("4", "Outstanding Interest", 250.0, ImpactType::Negative),
    ]
}

fn default_intents() -> Vec<Intent> {
    vec![
        Intent::new(
            "1",
            "Immediate Payment",
            ImpactType::Positive,
            "Customer expresses a clear willingness to pay immediately, confirming that they \
             have the funds available and intend to settle the outstanding amount without delay.",
            1.0,
        ),
        Intent::new(
            "2",
            "Financial Hardship",
            ImpactType::Negative,
            "Customer explains difficulties in meeting the payment due to financial \
             constraints, signalling potential delay or partial payment.",
            -0.5,
        ),
        Intent::new(
            "3",
            "Refusal to Pay",
            ImpactType::Negative,
            "Customer explicitly refuses to pay or denies responsibility for the payment.",
            -1.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_valid() {
        let session = SessionConfig::default();
        assert_eq!(session.parameters.len(), 4);
        assert_eq!(session.intents.len(), 3);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_empty_parameters_are_rejected() {
        let session = SessionConfig::new(vec![], default_intents());
        assert!(matches!(
            session.validate(),
            Err(AgentError::EmptyConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_intents_are_rejected() {
        let session = SessionConfig::new(default_parameters(), vec![]);
        assert!(matches!(
            session.validate(),
            Err(AgentError::EmptyConfiguration { .. })
        ));
    }
}
