// Initial strategy estimation from parameter severity
// Only runs when an agent is constructed; live turns never re-estimate it

use tracing::debug;

use crate::reinforcement::state::{ImpactType, Parameter, ParameterCategory};

impl ParameterCategory {
    /// Relative importance of the category in the severity average
    pub fn severity_weight(self) -> f64 {
        match self {
            ParameterCategory::MissedPayments => 3.0,
            ParameterCategory::OverdueDays => 2.5,
            ParameterCategory::AmountDue => 2.0,
            ParameterCategory::Interest => 1.5,
            ParameterCategory::Other => 1.0,
        }
    }

    /// Value mapped to a severity of 1
    fn severity_cap(self) -> f64 {
        match self {
            ParameterCategory::MissedPayments => 3.0,
            ParameterCategory::OverdueDays => 30.0,
            ParameterCategory::AmountDue => 5_000.0,
            ParameterCategory::Interest => 500.0,
            ParameterCategory::Other => 50.0,
        }
    }

    /// Severity magnitude in [0, 2]
    pub fn severity(self, value: f64) -> f64 {
        let value = match self {
            ParameterCategory::Other => value.abs(),
            _ => value,
        };
        (value / self.severity_cap()).clamp(0.0, 2.0)
    }
}

/// Computes the starting strategy index from parameter severity
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityEstimator;

impl SeverityEstimator {
    /// Weighted average severity; positive parameters count half and pull it down
    pub fn average_severity(parameters: &[Parameter]) -> f64 {
        let mut score = 0.0;
        let mut total_weight = 0.0;

        for param in parameters {
            let category = param.category();
            let weight = category.severity_weight();
            let severity = category.severity(param.finite_value());

            match param.impact {
                ImpactType::Negative => score += severity * weight,
                ImpactType::Positive => score -= severity * weight * 0.5,
                ImpactType::Neutral => {}
            }
            total_weight += weight;
        }

        score / f64::max(total_weight, 1.0)
    }

    /// Map parameters to an action index in `[0, strategy_count - 1]`
    pub fn initial_strategy(parameters: &[Parameter], strategy_count: usize) -> usize {
        if strategy_count == 0 {
            return 0;
        }

        let avg_severity = Self::average_severity(parameters);
        let raw = (avg_severity * strategy_count as f64 / 2.0).floor();
        let index = raw.clamp(0.0, (strategy_count - 1) as f64) as usize;

        debug!(
            "Estimated initial strategy index {} (average severity {:.2})",
            index, avg_severity
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reinforcement::action::STRATEGY_COUNT;

    fn reference_parameters() -> Vec<Parameter> {
        vec![
            Parameter::new("1", "Number of Missed Payments", 3.0, ImpactType::Negative),
            Parameter::new("2", "Instalment Amount Due", 5000.0, ImpactType::Negative),
            Parameter::new("3", "Days Past Due", 15.0, ImpactType::Negative),
            Parameter::new("4", "Outstanding Interest", 250.0, ImpactType::Negative),
        ]
    }

    #[test]
    fn test_reference_catalog_starts_at_firm_reminder() {
        // (3*1 + 2*1 + 2.5*0.5 + 1.5*0.5) / 9 = 0.7778 -> floor(2.72) = 2
        let params = reference_parameters();
        let avg = SeverityEstimator::average_severity(&params);
        assert!((avg - 7.0 / 9.0).abs() < 1e-9);
        assert_eq!(SeverityEstimator::initial_strategy(&params, STRATEGY_COUNT), 2);
    }

    #[test]
    fn test_extreme_severity_clamps_to_last_strategy() {
        let params = vec![Parameter::new("1", "Missed Payments", 100.0, ImpactType::Negative)];
        assert_eq!(
            SeverityEstimator::initial_strategy(&params, STRATEGY_COUNT),
            STRATEGY_COUNT - 1
        );
    }

    #[test]
    fn test_positive_parameters_clamp_to_mildest_strategy() {
        let params = vec![Parameter::new("1", "Amount Due", 9000.0, ImpactType::Positive)];
        assert!(SeverityEstimator::average_severity(&params) < 0.0);
        assert_eq!(SeverityEstimator::initial_strategy(&params, STRATEGY_COUNT), 0);
    }

    #[test]
    fn test_neutral_parameters_only_add_weight() {
        let params = vec![
            Parameter::new("1", "Missed Payments", 6.0, ImpactType::Negative),
            Parameter::new("2", "Overdue Days", 60.0, ImpactType::Neutral),
        ];
        // 2*3 / (3 + 2.5)
        let avg = SeverityEstimator::average_severity(&params);
        assert!((avg - 6.0 / 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_do_not_divide_by_zero() {
        assert_eq!(SeverityEstimator::average_severity(&[]), 0.0);
        assert_eq!(SeverityEstimator::initial_strategy(&[], STRATEGY_COUNT), 0);
        let params = reference_parameters();
        assert_eq!(SeverityEstimator::initial_strategy(&params, 1), 0);
        assert_eq!(SeverityEstimator::initial_strategy(&params, 0), 0);
    }

    #[test]
    fn test_estimation_is_deterministic() {
        let params = reference_parameters();
        let first = SeverityEstimator::initial_strategy(&params, STRATEGY_COUNT);
        for _ in 0..10 {
            assert_eq!(SeverityEstimator::initial_strategy(&params, STRATEGY_COUNT), first);
        }
    }
}
