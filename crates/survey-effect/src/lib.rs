//! Survey-weighted two-group effects
//!
//! This crate compares a reference group (not exposed) with a comparison
//! group (exposed) and reports the effect with a confidence interval.
//!
//! # Supported Effects
//!
//! - **Mean difference**: `mean2 - mean1` of weighted means with a fixed
//!   1.96 normal interval ([`weighted_mean_difference_and_ci`])
//! - **Relative risk**: ratio of weighted outcome proportions with a
//!   log-scale interval ([`weighted_relative_risk`])
//!
//! # Examples
//!
//! ```rust
//! use survey_core::WeightedSample;
//! use survey_effect::weighted_relative_risk;
//!
//! let not_exposed = WeightedSample::from_parts(&[true, false, false, false, false], &[1.0; 5]).unwrap();
//! let exposed = WeightedSample::from_parts(&[true, true, true, false, false], &[1.0; 5]).unwrap();
//!
//! let rr = weighted_relative_risk(&not_exposed, &exposed).unwrap();
//! assert!((rr.estimate - 3.0).abs() < 1e-12);
//! println!("{}", rr);
//! ```

mod mean_difference;
mod relative_risk;
mod traits;
mod types;

// Re-exports
pub use mean_difference::{weighted_mean_difference_and_ci, WeightedMeanDifference, Z_95};
pub use relative_risk::{weighted_relative_risk, WeightedRelativeRisk};
pub use traits::TwoGroupEffect;
pub use types::{EffectEstimate, EffectType};
