//! Full analysis over every configured cutoff

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::binning::{outcome_by_systolic_bins, BinnedOutcome};
use crate::categorical_table::CategoricalComparisonTable;
use crate::config::{AnalysisConfig, Cutoff, OutcomeKind};
use crate::dataset::SurveyFrame;
use crate::export::write_rows_to_path;
use crate::exposure::ExposureDefinition;
use crate::outcome_table::OutcomeComparisonTable;
use crate::trends::{exposure_proportion_by_year, pressure_trends, PressureTrend, YearlyInterval};
use crate::Result;

pub const BASELINE_FILE: &str = "baseline_characteristics.csv";
pub const OUTCOME_FILE: &str = "outcome_stats.csv";
pub const EXPOSURE_BY_YEAR_FILE: &str = "exposure_by_year.csv";
pub const SYSTOLIC_BINS_FILE: &str = "systolic_bins.csv";
pub const PRESSURE_TRENDS_FILE: &str = "pressure_trends.csv";

/// Tables computed for one cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffReport {
    pub cutoff: Cutoff,
    pub baseline: CategoricalComparisonTable,
    pub outcomes: OutcomeComparisonTable,
    /// Weighted share of exposed visits per survey year
    pub exposure_by_year: Vec<YearlyInterval>,
}

impl CutoffReport {
    pub fn build(frame: &SurveyFrame<'_>, cutoff: Cutoff, config: &AnalysisConfig) -> Result<Self> {
        let exposure = ExposureDefinition::from_survey_frame(frame, cutoff, &config.columns)?;
        let baseline =
            CategoricalComparisonTable::build(frame, &exposure, &config.categorical_queries)?;
        let outcomes = OutcomeComparisonTable::build(
            frame,
            &exposure,
            &config.outcome_queries,
            config.mean_display,
        )?;
        let exposure_by_year = exposure_proportion_by_year(
            frame,
            &config.columns.year,
            &exposure,
            config.confidence_level,
        )?;

        Ok(Self {
            cutoff,
            baseline,
            outcomes,
            exposure_by_year,
        })
    }

    /// Write this cutoff's tables to `base/stats_HTN_<sbp>_<dbp>/`
    ///
    /// Returns the directory written to.
    pub fn write_csv_dir(&self, base: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = base.as_ref().join(self.cutoff.dir_name());
        write_rows_to_path(&dir.join(BASELINE_FILE), self.baseline.rows())?;
        write_rows_to_path(&dir.join(OUTCOME_FILE), self.outcomes.rows())?;
        write_rows_to_path(&dir.join(EXPOSURE_BY_YEAR_FILE), &self.exposure_by_year)?;
        Ok(dir)
    }
}

/// Flat CSV record of one bin of a [`BinnedOutcome`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRecord {
    pub outcome: String,
    pub kind: OutcomeKind,
    pub bin: String,
    pub count: usize,
    pub weight: f64,
    pub value: Option<f64>,
}

/// Everything computed by [`run_analysis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// One report per cutoff, in configuration order
    pub cutoffs: Vec<CutoffReport>,
    /// Outcomes over systolic bins; independent of the cutoff
    pub systolic_bins: Vec<BinnedOutcome>,
    pub pressure_trends: Vec<PressureTrend>,
}

impl AnalysisReport {
    /// Report for a cutoff
    pub fn cutoff(&self, cutoff: Cutoff) -> Option<&CutoffReport> {
        self.cutoffs.iter().find(|r| r.cutoff == cutoff)
    }

    pub fn bin_records(&self) -> Vec<BinRecord> {
        self.systolic_bins
            .iter()
            .flat_map(|binned| {
                binned.histogram.bins().iter().map(|bin| BinRecord {
                    outcome: binned.outcome.clone(),
                    kind: binned.kind,
                    bin: bin.label(),
                    count: bin.count,
                    weight: bin.weight,
                    value: bin.value,
                })
            })
            .collect()
    }

    /// Write every cutoff directory plus the cutoff-independent tables under `base`
    pub fn write_csv_dir(&self, base: impl AsRef<Path>) -> Result<()> {
        let base = base.as_ref();
        for report in &self.cutoffs {
            report.write_csv_dir(base)?;
        }
        write_rows_to_path(&base.join(SYSTOLIC_BINS_FILE), &self.bin_records())?;
        write_rows_to_path(&base.join(PRESSURE_TRENDS_FILE), &self.pressure_trends)?;
        info!(path = %base.display(), cutoffs = self.cutoffs.len(), "wrote analysis report");
        Ok(())
    }
}

/// Run the configured analysis on a visit-level frame
///
/// Cutoffs only read the shared frame; with the `parallel` feature they are
/// built on the rayon pool. Results keep configuration order either way.
pub fn run_analysis(frame: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let survey = SurveyFrame::new(frame, &config.columns.weight)?;
    info!(
        visits = survey.height(),
        cutoffs = config.cutoffs.len(),
        "running analysis"
    );

    #[cfg(feature = "parallel")]
    let cutoffs = config
        .cutoffs
        .par_iter()
        .map(|&cutoff| CutoffReport::build(&survey, cutoff, config))
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let cutoffs = config
        .cutoffs
        .iter()
        .map(|&cutoff| CutoffReport::build(&survey, cutoff, config))
        .collect::<Result<Vec<_>>>()?;

    let systolic_bins = config
        .outcome_queries
        .iter()
        .map(|query| outcome_by_systolic_bins(&survey, &config.columns, query, &config.bin_edges))
        .collect::<Result<Vec<_>>>()?;
    let pressure_trends = pressure_trends(&survey, &config.columns, config.confidence_level)?;

    Ok(AnalysisReport {
        cutoffs,
        systolic_bins,
        pressure_trends,
    })
}
