//! Types for effect estimate representation

use serde::{Deserialize, Serialize};
use std::fmt;
use survey_confidence::ConfidenceInterval;

/// Types of two-group effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectType {
    /// Difference of weighted means, group 2 minus group 1
    MeanDifference,
    /// Ratio of weighted outcome proportions, exposed over not exposed
    RelativeRisk,
}

impl EffectType {
    /// Get the name of the effect type
    pub fn name(&self) -> &'static str {
        match self {
            Self::MeanDifference => "Mean Difference",
            Self::RelativeRisk => "Relative Risk",
        }
    }

    /// Value of the effect when the groups do not differ
    pub fn null_value(&self) -> f64 {
        match self {
            Self::MeanDifference => 0.0,
            Self::RelativeRisk => 1.0,
        }
    }
}

/// A two-group effect with its confidence interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEstimate {
    /// The point estimate
    pub estimate: f64,
    /// Interval around the estimate
    pub interval: ConfidenceInterval,
    /// The type of effect
    pub effect_type: EffectType,
    /// Number of non-missing records (group1, group2)
    pub sample_sizes: (usize, usize),
}

impl EffectEstimate {
    pub fn new(
        interval: ConfidenceInterval,
        effect_type: EffectType,
        sample_sizes: (usize, usize),
    ) -> Self {
        Self {
            estimate: interval.estimate,
            interval,
            effect_type,
            sample_sizes,
        }
    }

    pub fn lower(&self) -> f64 {
        self.interval.lower
    }

    pub fn upper(&self) -> f64 {
        self.interval.upper
    }

    /// Whether the interval excludes the no-effect value
    pub fn excludes_null(&self) -> bool {
        !self.interval.contains(self.effect_type.null_value())
    }
}

impl fmt::Display for EffectEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.3} ({:.3} - {:.3})",
            self.effect_type.name(),
            self.estimate,
            self.interval.lower,
            self.interval.upper
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_estimate() {
        let ci = ConfidenceInterval::new(0.45, 19.93, 3.0, 0.95);
        let effect = EffectEstimate::new(ci, EffectType::RelativeRisk, (5, 5));

        assert_eq!(effect.estimate, 3.0);
        assert_eq!(effect.lower(), 0.45);
        assert!(!effect.excludes_null());
        assert_eq!(effect.to_string(), "Relative Risk: 3.000 (0.450 - 19.930)");
    }

    #[test]
    fn test_mean_difference_null() {
        let ci = ConfidenceInterval::new(3.25, 6.75, 5.0, 0.95);
        let effect = EffectEstimate::new(ci, EffectType::MeanDifference, (5, 5));
        assert!(effect.excludes_null());
    }
}
