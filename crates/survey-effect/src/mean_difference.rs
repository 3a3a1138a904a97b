//! Weighted mean difference with a normal-approximation interval

use crate::{EffectEstimate, EffectType, TwoGroupEffect};
use survey_confidence::ConfidenceInterval;
use survey_core::{weighted_mean_and_std, Error, Result, WeightedSample};
use tracing::trace;

/// Fixed two-sided 95% critical value used by the mean difference interval
pub const Z_95: f64 = 1.96;

/// Difference of weighted means, `mean2 - mean1`
///
/// Each group's variance is the population weighted variance and the
/// standard error is `sqrt(var1 / W1 + var2 / W2)` with `W` the summed raw
/// weights. The interval is `difference ± 1.96 · SE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMeanDifference;

impl WeightedMeanDifference {
    pub fn new() -> Self {
        Self
    }
}

impl TwoGroupEffect<f64> for WeightedMeanDifference {
    fn effect_type(&self) -> EffectType {
        EffectType::MeanDifference
    }

    fn compute(
        &self,
        group1: &WeightedSample<f64>,
        group2: &WeightedSample<f64>,
    ) -> Result<EffectEstimate> {
        let m1 = weighted_mean_and_std(group1)?;
        let m2 = weighted_mean_and_std(group2)?;

        let difference = m2.mean - m1.mean;
        let std_error = (m1.variance / m1.weight_sum + m2.variance / m2.weight_sum).sqrt();
        if !std_error.is_finite() {
            return Err(Error::Computation(format!(
                "mean difference standard error is not finite: {std_error}"
            )));
        }
        trace!(difference, std_error, "weighted mean difference");

        Ok(EffectEstimate::new(
            ConfidenceInterval::symmetric(difference, Z_95 * std_error, 0.95),
            self.effect_type(),
            (m1.n, m2.n),
        ))
    }
}

/// Weighted mean difference `mean2 - mean1` with its 95% interval
pub fn weighted_mean_difference_and_ci(
    group1: &WeightedSample<f64>,
    group2: &WeightedSample<f64>,
) -> Result<EffectEstimate> {
    WeightedMeanDifference.compute(group1, group2)
}
