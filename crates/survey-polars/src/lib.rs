//! Polars integration for survey-weighted exposure comparisons
//!
//! This crate turns a visit-level Polars `DataFrame` into the comparison
//! tables of an elevated blood pressure study:
//!
//! - [`ExposureDefinition`] classifies visits against systolic/diastolic
//!   thresholds.
//! - [`CategoricalComparisonTable`] compares baseline characteristics between
//!   exposure groups with weighted chi-square tests.
//! - [`OutcomeComparisonTable`] compares outcomes by weighted relative risk
//!   or weighted mean difference.
//! - [`run_analysis`] runs every configured cutoff and collects the tables,
//!   the systolic bin aggregates and the yearly trends.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use survey_polars::{ColumnConfig, CategoricalQuery, Cutoff, SurveyStatsExt};
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("visits.csv".into()))?
//!     .finish()?;
//!
//! let table = df.baseline_table(
//!     Cutoff::new(140.0, 90.0),
//!     &[CategoricalQuery::binomial("FEMALE"), CategoricalQuery::multinomial("REGION")],
//!     &ColumnConfig::default(),
//! )?;
//! table.write_csv(std::io::stdout())?;
//! ```

mod analysis;
mod binning;
mod categorical_table;
mod config;
mod dataset;
mod error;
mod export;
mod exposure;
mod outcome_table;
mod traits;
mod trends;

pub use analysis::{
    run_analysis, AnalysisReport, BinRecord, CutoffReport, BASELINE_FILE, EXPOSURE_BY_YEAR_FILE,
    OUTCOME_FILE, PRESSURE_TRENDS_FILE, SYSTOLIC_BINS_FILE,
};
pub use binning::{outcome_by_systolic_bins, BinnedOutcome};
pub use categorical_table::{CategoricalComparisonTable, CategoricalRow, TOTALS_KEY};
pub use config::*;
pub use dataset::SurveyFrame;
pub use error::{Error, Result};
pub use export::write_rows;
pub use exposure::ExposureDefinition;
pub use outcome_table::{OutcomeComparisonTable, OutcomeRow, MISSING_MARKER, TOTAL_KEY};
pub use traits::SurveyStatsExt;
pub use trends::{
    exposure_proportion_by_year, pressure_trends, weighted_mean_ci_by_year,
    weighted_mean_std_by_year, PressureTrend, YearlyInterval, YearlyMoments,
};

// Re-export commonly used types from dependencies
pub use survey_histogram::BinEdges;
