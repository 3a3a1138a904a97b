//! Confidence intervals for survey-weighted estimates
//!
//! This crate provides interval estimators over paired
//! [`WeightedSample`](survey_core::WeightedSample)s:
//!
//! - **Asymptotic intervals**: weighted mean with a Student-t (or normal)
//!   reference, degrees of freedom taken from the summed survey weights
//! - **Wilson score intervals**: weighted proportions, using the weighted
//!   success count and total weight as trials
//!
//! # Examples
//!
//! ```rust
//! use survey_confidence::weighted_mean_and_ci;
//! use survey_core::WeightedSample;
//!
//! let sample = WeightedSample::from_parts(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0],
//!     &[10.0, 20.0, 15.0, 45.0, 20.0],
//! ).unwrap();
//!
//! let ci = weighted_mean_and_ci(&sample, 0.95).unwrap();
//! assert!(ci.contains(ci.estimate));
//! println!("{}", ci);
//! ```

mod asymptotic;
mod proportion;
mod traits;
mod types;

// Re-exports
pub use asymptotic::{weighted_mean_and_ci, AsymptoticCI};
pub use proportion::{weighted_proportion_ci, WilsonScoreCI};
pub use traits::ConfidenceIntervalEstimator;
pub use types::{ConfidenceInterval, ConfidenceLevel};
