// Reward system for the reinforcement learning agent
// Scores a classified customer reply against the strategy that provoked it

use crate::classifier::ClassifiedIntent;
use crate::reinforcement::action::severity_ratio;
use crate::reinforcement::state::ImpactType;

/// Confidence used when the classifier reports none
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Severity above which a favorable reply means the agent over-escalated
const HIGH_SEVERITY: f64 = 0.6;

/// Severity below which an unfavorable reply means the agent was too lenient
const LOW_SEVERITY: f64 = 0.4;

const MISMATCH_PENALTY: f64 = -0.2;
const APPROPRIATE_BONUS: f64 = 0.1;

/// Base reward by intent type
pub fn base_reward(impact: ImpactType) -> f64 {
    match impact {
        ImpactType::Positive => 1.0,
        ImpactType::Negative => -0.7,
        ImpactType::Neutral => 0.1,
    }
}

/// Bonus or penalty for how well the current severity fits the reply
pub fn strategy_adjustment(impact: ImpactType, current_action: usize, strategy_count: usize) -> f64 {
    let severity = severity_ratio(current_action, strategy_count);
    match impact {
        ImpactType::Positive if severity > HIGH_SEVERITY => MISMATCH_PENALTY,
        ImpactType::Negative if severity < LOW_SEVERITY => MISMATCH_PENALTY,
        _ => APPROPRIATE_BONUS,
    }
}

/// Calculate the reward for a classified reply under the current strategy
///
/// `base * confidence + adjustment`, where a zero or non-finite confidence
/// counts as 0.5. A synthesized Unknown intent has no type of its own and
/// contributes no base reward. Pure and deterministic.
pub fn calculate_reward(
    intent: &ClassifiedIntent,
    current_action: usize,
    strategy_count: usize,
) -> f64 {
    let confidence = if intent.confidence.is_finite() && intent.confidence > 0.0 {
        intent.confidence
    } else {
        DEFAULT_CONFIDENCE
    };

    let base = if intent.is_unknown() {
        0.0
    } else {
        base_reward(intent.impact())
    };

    base * confidence
        + strategy_adjustment(intent.impact(), current_action, strategy_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{fallback_classify, Intent};
    use crate::config::SessionConfig;
    use crate::reinforcement::action::STRATEGY_COUNT;

    fn classified(impact: ImpactType, confidence: f64) -> ClassifiedIntent {
        ClassifiedIntent::new(Intent::new("1", "Test", impact, "", 0.0), confidence)
    }

    #[test]
    fn test_negative_reply_at_mild_strategy() {
        let reward = calculate_reward(&classified(ImpactType::Negative, 0.9), 0, STRATEGY_COUNT);
        assert!((reward - (-0.83)).abs() < 1e-12);
    }

    #[test]
    fn test_positive_reply_at_severe_strategy_is_penalized() {
        // 5/6 > 0.6
        let reward = calculate_reward(&classified(ImpactType::Positive, 1.0), 5, STRATEGY_COUNT);
        assert!((reward - 0.8).abs() < 1e-12);
        // 3/6 = 0.5 is not high
        let reward = calculate_reward(&classified(ImpactType::Positive, 1.0), 3, STRATEGY_COUNT);
        assert!((reward - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_negative_reply_at_severe_strategy_is_appropriate() {
        let reward = calculate_reward(&classified(ImpactType::Negative, 1.0), 6, STRATEGY_COUNT);
        assert!((reward - (-0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_confidence_defaults_to_half() {
        let reward = calculate_reward(&classified(ImpactType::Neutral, 0.0), 2, STRATEGY_COUNT);
        assert!((reward - (0.1 * 0.5 + 0.1)).abs() < 1e-12);
        let reward = calculate_reward(&classified(ImpactType::Positive, f64::NAN), 0, STRATEGY_COUNT);
        assert!((reward - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_full_confidence_rewards_are_bounded() {
        for impact in [ImpactType::Positive, ImpactType::Negative, ImpactType::Neutral] {
            for action in 0..STRATEGY_COUNT {
                let reward = calculate_reward(&classified(impact, 1.0), action, STRATEGY_COUNT);
                assert!((-0.9..=1.1).contains(&reward), "{impact} at {action}: {reward}");
            }
        }
    }

    #[test]
    fn test_unknown_reply_earns_only_the_adjustment() {
        let catalog = SessionConfig::default().intents;
        let unknown = fallback_classify("good morning", &catalog);
        assert!(unknown.is_unknown());

        for action in 0..STRATEGY_COUNT {
            let reward = calculate_reward(&unknown, action, STRATEGY_COUNT);
            assert!((reward - 0.1).abs() < 1e-12, "action {action}: {reward}");
        }

        let reported = ClassifiedIntent::unknown(Some("Greeting"), "Unknown intent", 0.9);
        assert!((calculate_reward(&reported, 6, STRATEGY_COUNT) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_single_strategy_catalog_does_not_divide_by_zero() {
        let reward = calculate_reward(&classified(ImpactType::Negative, 1.0), 0, 1);
        assert!(reward.is_finite());
        assert!((reward - (-0.9)).abs() < 1e-12);
    }
}
