//! Wilson score interval for weighted proportions

use crate::{ConfidenceInterval, ConfidenceIntervalEstimator, ConfidenceLevel};
use survey_core::math::distributions::normal;
use survey_core::{weighted_proportion, Result, WeightedSample};

/// Wilson score interval estimator
///
/// The weighted count of `true` records is used as the number of successes
/// and the total weight as the number of trials.
#[derive(Debug, Clone, Default)]
pub struct WilsonScoreCI {
    confidence_level: ConfidenceLevel,
}

impl WilsonScoreCI {
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self { confidence_level }
    }

    /// Interval for `count` successes out of `nobs` trials
    pub fn from_counts(&self, count: f64, nobs: f64) -> Result<ConfidenceInterval> {
        let p = count / nobs;
        let z = normal::critical_value(self.confidence_level.value())?;
        let z2 = z * z;

        let denom = 1.0 + z2 / nobs;
        let center = (p + z2 / (2.0 * nobs)) / denom;
        let half_width = z * (p * (1.0 - p) / nobs + z2 / (4.0 * nobs * nobs)).sqrt() / denom;

        Ok(ConfidenceInterval::new(
            center - half_width,
            center + half_width,
            p,
            self.confidence_level.value(),
        ))
    }
}

impl ConfidenceIntervalEstimator<bool> for WilsonScoreCI {
    fn confidence_interval(&self, sample: &WeightedSample<bool>) -> Result<ConfidenceInterval> {
        // Rejects zero total weight before the division below
        weighted_proportion(sample)?;
        self.from_counts(sample.positive_weight(), sample.total_weight())
    }

    fn confidence_level(&self) -> f64 {
        self.confidence_level.value()
    }
}

/// Weighted proportion with a Wilson score interval
pub fn weighted_proportion_ci(
    sample: &WeightedSample<bool>,
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    WilsonScoreCI::new(ConfidenceLevel::try_new(confidence_level)?).confidence_interval(sample)
}
