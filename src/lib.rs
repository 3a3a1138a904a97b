//! Survey-weighted comparison of emergency department visits by blood pressure
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`weighted`]: paired weighted samples, survey weights and descriptive estimators
//! - [`confidence`]: Student-t and Wilson score intervals
//! - [`contingency`]: weighted contingency tables and chi-square tests
//! - [`effect`]: weighted mean difference and relative risk
//! - [`histogram`]: right-closed binning with per-bin weighted aggregates
//! - [`tables`]: exposure classification and comparison tables over a
//!   Polars `DataFrame`
//!
//! # Example
//!
//! ```rust,ignore
//! use nhamcs_bp::{run_analysis, AnalysisConfig};
//!
//! let config = AnalysisConfig::from_path("analysis.json")?;
//! let report = run_analysis(&visits, &config)?;
//! report.write_csv_dir("results")?;
//! ```

pub use survey_confidence as confidence;
pub use survey_contingency as contingency;
pub use survey_core as weighted;
pub use survey_effect as effect;
pub use survey_histogram as histogram;
pub use survey_polars as tables;

pub use survey_polars::{
    run_analysis, AnalysisConfig, AnalysisReport, CategoricalComparisonTable, CutoffReport,
    ExposureDefinition, OutcomeComparisonTable, SurveyStatsExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use survey_confidence::{weighted_mean_and_ci, weighted_proportion_ci, ConfidenceInterval};
    pub use survey_contingency::{weighted_chi2, weighted_contingency};
    pub use survey_core::prelude::*;
    pub use survey_effect::{
        weighted_mean_difference_and_ci, weighted_relative_risk, EffectEstimate,
    };
    pub use survey_polars::{
        AnalysisConfig, CategoricalQuery, Cutoff, MeanDisplay, OutcomeQuery, SurveyStatsExt,
    };
}
