//! Core traits for confidence interval estimation
//!
//! Interval estimators are small configuration values (a confidence level
//! and a reference distribution). The sample is passed in on every call so
//! one estimator can be reused across groups, years and cutoffs.

use crate::types::ConfidenceInterval;
use survey_core::{Result, WeightedSample};

/// Confidence interval estimator over a paired sample
///
/// `T` is the value type of the sample: `f64` for continuous measures,
/// `bool` for indicators.
pub trait ConfidenceIntervalEstimator<T> {
    fn confidence_interval(&self, sample: &WeightedSample<T>) -> Result<ConfidenceInterval>;

    /// Coverage of the intervals this estimator produces
    fn confidence_level(&self) -> f64;
}
