//! Core types and weighted estimators for survey-weighted analysis
//!
//! This crate provides the building blocks shared by every other crate in
//! the workspace:
//!
//! - **Paired samples**: [`WeightedSample`] holds `{value, weight}` records so
//!   values and survey weights cannot drift out of alignment.
//! - **Row-keyed weights**: [`SurveyWeights`] looks weights up by [`RowId`],
//!   never by position inside a subset.
//! - **Categorical series**: [`CategoricalSeries`] carries an explicit ordered
//!   label set so two subsets of a column can be cross-tabulated.
//! - **Descriptive estimators**: weighted proportion, weighted mean and
//!   population standard deviation.
//! - **Distributions**: normal, Student-t and chi-squared helpers backed by
//!   `statrs`.
//!
//! # Example
//!
//! ```rust
//! use survey_core::{weighted_mean_and_std, WeightedSample};
//!
//! let sample = WeightedSample::from_parts(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0],
//!     &[10.0, 20.0, 15.0, 45.0, 20.0],
//! ).unwrap();
//! let moments = weighted_mean_and_std(&sample).unwrap();
//! assert!((moments.mean - 3.409).abs() < 1e-3);
//! ```

pub mod categorical;
pub mod error;
pub mod math;
pub mod sample;
pub mod weighted;

pub use categorical::CategoricalSeries;
pub use error::{Error, Result};
pub use sample::{RowId, SurveyWeights, Weighted, WeightedSample};
pub use weighted::{
    weighted_average, weighted_mean_and_std, weighted_proportion, weighted_sum, WeightedMoments,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of persons per reporting unit in comparison tables
pub const MILLIONS: f64 = 1e6;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        weighted_mean_and_std, weighted_proportion, CategoricalSeries, Error, Result, RowId,
        SurveyWeights, Weighted, WeightedMoments, WeightedSample,
    };
}
