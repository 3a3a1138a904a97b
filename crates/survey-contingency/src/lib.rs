//! Contingency tables and chi-square tests for survey-weighted data
//!
//! - [`weighted_contingency`] sums survey weights per category for two
//!   categorical series that share one ordered label set
//! - [`chi_square_test`] runs Pearson's test of independence on any `r × c`
//!   table, with optional Yates correction for 2×2 tables
//! - [`weighted_chi2`] is the 2×2 shortcut for two indicator samples
//!
//! # Example
//!
//! ```rust
//! use survey_contingency::chi_square_test;
//!
//! let test = chi_square_test(&[[4.0, 6.0], [7.0, 3.0]], true).unwrap();
//! assert!((test.p_value - 0.3687).abs() < 1e-3);
//! ```

mod chi_square;
mod table;

pub use chi_square::{chi_square_test, weighted_chi2, ChiSquareTest};
pub use table::{contingency, weighted_contingency, ContingencyTable};
