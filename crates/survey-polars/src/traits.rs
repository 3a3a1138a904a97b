//! Extension trait for survey-weighted comparisons on Polars DataFrames

use polars::prelude::*;

use crate::analysis::{run_analysis, AnalysisReport};
use crate::binning::{outcome_by_systolic_bins, BinnedOutcome};
use crate::categorical_table::CategoricalComparisonTable;
use crate::config::{AnalysisConfig, CategoricalQuery, ColumnConfig, Cutoff, MeanDisplay, OutcomeQuery};
use crate::dataset::SurveyFrame;
use crate::exposure::ExposureDefinition;
use crate::outcome_table::OutcomeComparisonTable;
use crate::Result;
use survey_histogram::BinEdges;

/// Extension trait for survey-weighted exposure comparisons on Polars DataFrames
///
/// Every method reads the survey weight and blood pressure columns named by
/// `columns`; the frame itself is never modified.
pub trait SurveyStatsExt {
    /// Classify every visit against `cutoff`
    ///
    /// # Returns
    /// One exposure flag per row
    fn exposure(&self, cutoff: Cutoff, columns: &ColumnConfig) -> Result<Vec<bool>>;

    /// Build the baseline characteristics table
    ///
    /// # Arguments
    /// * `cutoff` - Thresholds defining the exposed group
    /// * `queries` - Variables to compare, in output order
    /// * `columns` - Weight and measurement column names
    fn baseline_table(
        &self,
        cutoff: Cutoff,
        queries: &[CategoricalQuery],
        columns: &ColumnConfig,
    ) -> Result<CategoricalComparisonTable>;

    /// Build the outcome comparison table
    ///
    /// # Arguments
    /// * `cutoff` - Thresholds defining the exposed group
    /// * `queries` - Outcomes to compare, in output order
    /// * `columns` - Weight and measurement column names
    /// * `mean_display` - How group means of numeric outcomes are shown
    fn outcome_table(
        &self,
        cutoff: Cutoff,
        queries: &[OutcomeQuery],
        columns: &ColumnConfig,
        mean_display: MeanDisplay,
    ) -> Result<OutcomeComparisonTable>;

    /// Aggregate an outcome over triage systolic pressure bins
    fn systolic_bins(
        &self,
        query: &OutcomeQuery,
        edges: &BinEdges,
        columns: &ColumnConfig,
    ) -> Result<BinnedOutcome>;

    /// Run the whole configured analysis
    fn survey_analysis(&self, config: &AnalysisConfig) -> Result<AnalysisReport>;
}

impl SurveyStatsExt for DataFrame {
    fn exposure(&self, cutoff: Cutoff, columns: &ColumnConfig) -> Result<Vec<bool>> {
        Ok(ExposureDefinition::from_frame(self, cutoff, columns)?.classify())
    }

    fn baseline_table(
        &self,
        cutoff: Cutoff,
        queries: &[CategoricalQuery],
        columns: &ColumnConfig,
    ) -> Result<CategoricalComparisonTable> {
        let frame = SurveyFrame::new(self, &columns.weight)?;
        let exposure = ExposureDefinition::from_survey_frame(&frame, cutoff, columns)?;
        CategoricalComparisonTable::build(&frame, &exposure, queries)
    }

    fn outcome_table(
        &self,
        cutoff: Cutoff,
        queries: &[OutcomeQuery],
        columns: &ColumnConfig,
        mean_display: MeanDisplay,
    ) -> Result<OutcomeComparisonTable> {
        let frame = SurveyFrame::new(self, &columns.weight)?;
        let exposure = ExposureDefinition::from_survey_frame(&frame, cutoff, columns)?;
        OutcomeComparisonTable::build(&frame, &exposure, queries, mean_display)
    }

    fn systolic_bins(
        &self,
        query: &OutcomeQuery,
        edges: &BinEdges,
        columns: &ColumnConfig,
    ) -> Result<BinnedOutcome> {
        let frame = SurveyFrame::new(self, &columns.weight)?;
        outcome_by_systolic_bins(&frame, columns, query, edges)
    }

    fn survey_analysis(&self, config: &AnalysisConfig) -> Result<AnalysisReport> {
        run_analysis(self, config)
    }
}
