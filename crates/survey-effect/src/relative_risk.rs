//! Weighted relative risk with a log-scale interval

use crate::{EffectEstimate, EffectType, TwoGroupEffect};
use survey_confidence::{ConfidenceInterval, ConfidenceLevel};
use survey_core::math::distributions::normal;
use survey_core::{Error, Result, WeightedSample};
use tracing::trace;

/// Relative risk of an outcome, exposed over not exposed
///
/// With weighted counts `a` (exposed with outcome), `c` (exposed without),
/// `b` (not exposed with outcome) and `d` (not exposed without):
///
/// ```text
/// RR = (a / (a + c)) / (b / (b + d))
/// SE(ln RR) = sqrt(1/a - 1/(a + c) + 1/b - 1/(b + d))
/// ```
///
/// and the interval is `exp(ln RR ± z · SE)`.
#[derive(Debug, Clone, Default)]
pub struct WeightedRelativeRisk {
    confidence_level: ConfidenceLevel,
}

impl WeightedRelativeRisk {
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self { confidence_level }
    }
}

fn positive(value: f64, what: &str) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDomain(format!(
            "relative risk needs a positive {what}, got {value}"
        )))
    }
}

impl TwoGroupEffect<bool> for WeightedRelativeRisk {
    fn effect_type(&self) -> EffectType {
        EffectType::RelativeRisk
    }

    fn compute(
        &self,
        not_exposed: &WeightedSample<bool>,
        exposed: &WeightedSample<bool>,
    ) -> Result<EffectEstimate> {
        let a = positive(exposed.positive_weight(), "exposed outcome weight")?;
        let exposed_total = positive(exposed.total_weight(), "exposed weight")?;
        let b = positive(not_exposed.positive_weight(), "not-exposed outcome weight")?;
        let not_exposed_total = positive(not_exposed.total_weight(), "not-exposed weight")?;

        let rr = (a / exposed_total) / (b / not_exposed_total);
        let log_se = (1.0 / a - 1.0 / exposed_total + 1.0 / b - 1.0 / not_exposed_total).sqrt();
        let z = normal::critical_value(self.confidence_level.value())?;
        trace!(rr, log_se, z, "weighted relative risk");

        let interval = ConfidenceInterval::new(
            (rr.ln() - z * log_se).exp(),
            (rr.ln() + z * log_se).exp(),
            rr,
            self.confidence_level.value(),
        );
        Ok(EffectEstimate::new(
            interval,
            self.effect_type(),
            (not_exposed.len(), exposed.len()),
        ))
    }
}

/// Weighted relative risk of `exposed` against `not_exposed` with a 95% interval
pub fn weighted_relative_risk(
    not_exposed: &WeightedSample<bool>,
    exposed: &WeightedSample<bool>,
) -> Result<EffectEstimate> {
    WeightedRelativeRisk::default().compute(not_exposed, exposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn indicators(codes: &[u8], weights: &[f64]) -> WeightedSample<bool> {
        let values: Vec<bool> = codes.iter().map(|&c| c == 1).collect();
        WeightedSample::from_parts(&values, weights).unwrap()
    }

    #[test]
    fn test_unit_weights() {
        let not_exposed = indicators(&[1, 0, 0, 0, 0], &[1.0; 5]);
        let exposed = indicators(&[1, 1, 1, 0, 0], &[1.0; 5]);

        let effect = weighted_relative_risk(&not_exposed, &exposed).unwrap();
        assert_relative_eq!(effect.estimate, 3.0, epsilon = 1e-12);
        assert_relative_eq!(effect.lower(), 0.4516, epsilon = 1e-4);
        assert_relative_eq!(effect.upper(), 19.9278, epsilon = 1e-3);
        assert!(!effect.excludes_null());
    }

    #[test]
    fn test_weights_enter_counts() {
        // a = 6, a + c = 8, b = 1, b + d = 4
        let not_exposed = indicators(&[1, 0], &[1.0, 3.0]);
        let exposed = indicators(&[1, 0, 1], &[2.0, 2.0, 4.0]);

        let effect = weighted_relative_risk(&not_exposed, &exposed).unwrap();
        assert_relative_eq!(effect.estimate, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_brackets_estimate_on_log_scale() {
        let not_exposed = indicators(&[1, 1, 0, 0, 0, 0], &[3.0, 1.0, 2.0, 2.0, 5.0, 1.0]);
        let exposed = indicators(&[1, 0, 1, 0], &[4.0, 1.0, 2.0, 6.0]);

        let effect = weighted_relative_risk(&not_exposed, &exposed).unwrap();
        let lower_gap = effect.estimate.ln() - effect.lower().ln();
        let upper_gap = effect.upper().ln() - effect.estimate.ln();
        assert_relative_eq!(lower_gap, upper_gap, epsilon = 1e-10);
    }

    #[test]
    fn test_no_outcome_in_reference_group() {
        let not_exposed = indicators(&[0, 0, 0], &[1.0; 3]);
        let exposed = indicators(&[1, 0, 0], &[1.0; 3]);
        assert!(matches!(
            weighted_relative_risk(&not_exposed, &exposed),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_empty_exposed_group() {
        let not_exposed = indicators(&[1, 0, 0], &[1.0; 3]);
        assert!(matches!(
            weighted_relative_risk(&not_exposed, &WeightedSample::new()),
            Err(Error::InvalidDomain(_))
        ));
    }
}
