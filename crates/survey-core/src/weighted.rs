//! Weighted descriptive estimators
//!
//! The variance reported here is the population variance of the weighted
//! sample: squared deviations are averaged with weights normalised to sum to
//! one, without any `n - 1` style correction.

use crate::{Error, Result, WeightedSample};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Weighted share of `true` values: `sum(v * w) / sum(w)`
///
/// Fails with `InvalidDomain` when the total weight is zero, which includes
/// the empty sample.
pub fn weighted_proportion(sample: &WeightedSample<bool>) -> Result<f64> {
    let total = sample.total_weight();
    if total <= 0.0 {
        return Err(Error::zero_weight("weighted proportion"));
    }
    Ok(sample.positive_weight() / total)
}

/// First two weighted moments of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedMoments {
    pub mean: f64,
    /// Population variance using normalised weights
    pub variance: f64,
    pub std_dev: f64,
    /// Sum of the raw weights of the non-missing records
    pub weight_sum: f64,
    /// Number of non-missing records
    pub n: usize,
}

/// Weighted mean and population standard deviation
///
/// Missing values (NaN) are dropped together with their weights first.
pub fn weighted_mean_and_std(sample: &WeightedSample<f64>) -> Result<WeightedMoments> {
    let complete = sample.drop_missing();
    if complete.len() < sample.len() {
        trace!(
            dropped = sample.len() - complete.len(),
            kept = complete.len(),
            "dropped missing values"
        );
    }
    let weight_sum = complete.total_weight();
    if complete.is_empty() || weight_sum <= 0.0 {
        return Err(Error::zero_weight("weighted mean"));
    }

    let mean = complete
        .iter()
        .map(|r| (r.weight / weight_sum) * r.value)
        .sum::<f64>();
    let variance = complete
        .iter()
        .map(|r| (r.weight / weight_sum) * (r.value - mean).powi(2))
        .sum::<f64>();

    Ok(WeightedMoments {
        mean,
        variance,
        std_dev: variance.sqrt(),
        weight_sum,
        n: complete.len(),
    })
}

/// Weighted average of the non-missing values
pub fn weighted_average(sample: &WeightedSample<f64>) -> Result<f64> {
    weighted_mean_and_std(sample).map(|m| m.mean)
}

/// `sum(v * w)` over the non-missing values
pub fn weighted_sum(sample: &WeightedSample<f64>) -> f64 {
    sample
        .iter()
        .filter(|r| !r.value.is_nan())
        .map(|r| r.value * r.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weighted_proportion() {
        let sample =
            WeightedSample::from_parts(&[true, false, true, false], &[1.0, 1.0, 3.0, 5.0])
                .unwrap();
        assert_relative_eq!(weighted_proportion(&sample).unwrap(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_proportion_empty_is_invalid_domain() {
        let sample = WeightedSample::<bool>::new();
        assert!(matches!(
            weighted_proportion(&sample),
            Err(Error::InvalidDomain(_))
        ));

        let zero = WeightedSample::from_parts(&[true, false], &[0.0, 0.0]).unwrap();
        assert!(matches!(
            weighted_proportion(&zero),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_weighted_mean_and_std() {
        let sample = WeightedSample::from_parts(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[10.0, 20.0, 15.0, 45.0, 20.0],
        )
        .unwrap();
        let moments = weighted_mean_and_std(&sample).unwrap();

        assert_relative_eq!(moments.mean, 375.0 / 110.0, epsilon = 1e-12);
        assert_relative_eq!(moments.variance, 1.5144628099173556, epsilon = 1e-9);
        assert_relative_eq!(moments.std_dev, moments.variance.sqrt());
        assert_eq!(moments.weight_sum, 110.0);
        assert_eq!(moments.n, 5);
    }

    #[test]
    fn test_population_not_sample_std() {
        // Unit weights: population variance of 1..5 is 2, not 2.5
        let sample =
            WeightedSample::from_parts(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0; 5]).unwrap();
        let moments = weighted_mean_and_std(&sample).unwrap();
        assert_relative_eq!(moments.mean, 3.0, epsilon = 1e-12);
        assert_relative_eq!(moments.variance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_values_are_dropped_with_their_weights() {
        let sample =
            WeightedSample::from_parts(&[2.0, f64::NAN, 4.0], &[1.0, 1000.0, 1.0]).unwrap();
        let moments = weighted_mean_and_std(&sample).unwrap();
        assert_relative_eq!(moments.mean, 3.0, epsilon = 1e-12);
        assert_eq!(moments.weight_sum, 2.0);
        assert_eq!(moments.n, 2);
    }

    #[test]
    fn test_all_missing_is_invalid_domain() {
        let sample = WeightedSample::from_parts(&[f64::NAN, f64::NAN], &[1.0, 2.0]).unwrap();
        assert!(matches!(
            weighted_mean_and_std(&sample),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_weighted_sum_skips_missing() {
        let sample =
            WeightedSample::from_parts(&[1.0, f64::NAN, 0.0, 1.0], &[2.0, 3.0, 4.0, 5.0])
                .unwrap();
        assert_relative_eq!(weighted_sum(&sample), 7.0);
    }
}
