//! Core traits for two-group effect estimation

use crate::types::{EffectEstimate, EffectType};
use survey_core::{Result, WeightedSample};

/// Effect estimator between two weighted groups
///
/// `group1` is the reference group (not exposed) and `group2` the comparison
/// group (exposed). Estimators are not symmetric.
pub trait TwoGroupEffect<T> {
    /// Get the type of effect this estimator computes
    fn effect_type(&self) -> EffectType;

    /// Compute the effect and its interval
    fn compute(
        &self,
        group1: &WeightedSample<T>,
        group2: &WeightedSample<T>,
    ) -> Result<EffectEstimate>;
}
