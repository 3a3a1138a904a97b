//! Asymptotic confidence intervals for weighted means

use crate::{ConfidenceInterval, ConfidenceIntervalEstimator, ConfidenceLevel};
use survey_core::math::distributions::{normal, students_t};
use survey_core::{weighted_mean_and_std, Error, Result, WeightedMoments, WeightedSample};
use tracing::trace;

/// Asymptotic confidence interval estimator for the weighted mean
///
/// The standard error is the population weighted standard deviation divided
/// by the square root of the summed raw weights. With the t reference the
/// degrees of freedom are `weight_sum - 1`, so a survey weight counts as that
/// many observations.
#[derive(Debug, Clone)]
pub struct AsymptoticCI {
    /// Confidence level
    confidence_level: ConfidenceLevel,
    /// Whether to use t-distribution (true) or normal (false)
    use_t_distribution: bool,
}

impl AsymptoticCI {
    /// Create a new asymptotic CI estimator using normal distribution
    pub fn normal(confidence_level: ConfidenceLevel) -> Self {
        Self {
            confidence_level,
            use_t_distribution: false,
        }
    }

    /// Create a new asymptotic CI estimator using t-distribution
    pub fn students_t(confidence_level: ConfidenceLevel) -> Self {
        Self {
            confidence_level,
            use_t_distribution: true,
        }
    }

    /// Interval around precomputed moments
    pub fn from_moments(&self, moments: &WeightedMoments) -> Result<ConfidenceInterval> {
        let level = self.confidence_level.value();
        let critical_value = if self.use_t_distribution {
            let df = moments.weight_sum - 1.0;
            if df <= 0.0 {
                return Err(Error::InvalidDomain(format!(
                    "t interval needs a weight sum above 1, got {}",
                    moments.weight_sum
                )));
            }
            students_t::critical_value(level, df)?
        } else {
            normal::critical_value(level)?
        };

        let std_error = moments.std_dev / moments.weight_sum.sqrt();
        trace!(
            mean = moments.mean,
            std_error,
            critical_value,
            "asymptotic interval"
        );

        Ok(ConfidenceInterval::symmetric(
            moments.mean,
            critical_value * std_error,
            level,
        ))
    }
}

impl Default for AsymptoticCI {
    fn default() -> Self {
        Self::students_t(ConfidenceLevel::default())
    }
}

impl ConfidenceIntervalEstimator<f64> for AsymptoticCI {
    fn confidence_interval(&self, sample: &WeightedSample<f64>) -> Result<ConfidenceInterval> {
        let moments = weighted_mean_and_std(sample)?;
        self.from_moments(&moments)
    }

    fn confidence_level(&self) -> f64 {
        self.confidence_level.value()
    }
}

/// Weighted mean with a Student-t confidence interval
///
/// Missing values (`NaN`) are dropped together with their weights.
pub fn weighted_mean_and_ci(
    sample: &WeightedSample<f64>,
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    AsymptoticCI::students_t(ConfidenceLevel::try_new(confidence_level)?).confidence_interval(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> WeightedSample<f64> {
        WeightedSample::from_parts(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 15.0, 45.0, 20.0])
            .unwrap()
    }

    #[test]
    fn test_weighted_mean_and_ci() {
        let ci = weighted_mean_and_ci(&sample(), 0.95).unwrap();

        assert_relative_eq!(ci.estimate, 3.409090909, epsilon = 1e-6);
        // SE = 1.2306351 / sqrt(110), t(0.975, 109) = 1.98197
        assert_relative_eq!(ci.lower, 3.1765, epsilon = 1e-3);
        assert_relative_eq!(ci.upper, 3.6416, epsilon = 1e-3);
        assert!((ci.lower - 3.082).abs() < 0.1);
        assert!((ci.upper - 3.645).abs() < 0.1);
        assert_eq!(ci.confidence_level, 0.95);
    }

    #[test]
    fn test_missing_values_are_dropped() {
        let with_missing = WeightedSample::from_parts(
            &[1.0, f64::NAN, 2.0, 3.0, 4.0, 5.0],
            &[10.0, 99.0, 20.0, 15.0, 45.0, 20.0],
        )
        .unwrap();
        let a = weighted_mean_and_ci(&with_missing, 0.95).unwrap();
        let b = weighted_mean_and_ci(&sample(), 0.95).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normal_interval_is_narrower() {
        let moments = weighted_mean_and_std(&sample()).unwrap();
        let t = AsymptoticCI::students_t(ConfidenceLevel::NINETY_FIVE)
            .from_moments(&moments)
            .unwrap();
        let z = AsymptoticCI::normal(ConfidenceLevel::NINETY_FIVE)
            .from_moments(&moments)
            .unwrap();
        assert!(z.width() < t.width());
        assert_eq!(z.estimate, t.estimate);
    }

    #[test]
    fn test_constant_sample_gives_degenerate_interval() {
        let sample = WeightedSample::from_parts(&[7.0, 7.0, 7.0], &[1.0, 1.0, 2.0]).unwrap();
        let ci = weighted_mean_and_ci(&sample, 0.95).unwrap();
        assert_eq!(ci.lower, 7.0);
        assert_eq!(ci.upper, 7.0);
    }

    #[test]
    fn test_weight_sum_of_one_is_rejected() {
        let sample = WeightedSample::from_parts(&[1.0, 2.0], &[0.5, 0.5]).unwrap();
        assert!(matches!(
            weighted_mean_and_ci(&sample, 0.95),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        let sample = WeightedSample::<f64>::new();
        assert!(matches!(
            weighted_mean_and_ci(&sample, 0.95),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_invalid_confidence_level() {
        assert!(weighted_mean_and_ci(&sample(), 1.0).is_err());
    }
}
