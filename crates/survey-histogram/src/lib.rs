//! Right-closed binning with survey-weighted aggregation
//!
//! Records are grouped into bins `(a, b]` by a key column and every bin is
//! reduced to one weighted value. Bins that receive no usable record carry
//! `None` instead of a number.
//!
//! # Examples
//!
//! ```rust
//! use survey_core::WeightedSample;
//! use survey_histogram::{BinEdges, WeightedBinner};
//!
//! let systolic = [118.0, 135.0, 182.0, 190.0];
//! let admitted = WeightedSample::from_parts(
//!     &[false, true, true, false],
//!     &[1200.0, 800.0, 950.0, 1050.0],
//! ).unwrap();
//!
//! let binner = WeightedBinner::new(BinEdges::systolic());
//! let histogram = binner.proportions(&systolic, &admitted).unwrap();
//! for bin in histogram.bins() {
//!     println!("{}", bin);
//! }
//! assert_eq!(histogram.len(), 9);
//! ```

mod builders;
mod traits;
mod types;

pub use builders::{WeightedAverage, WeightedBinner, WeightedProportion};
pub use traits::BinAggregator;
pub use types::{BinEdges, WeightedBin, WeightedHistogram, SYSTOLIC_EDGES};
