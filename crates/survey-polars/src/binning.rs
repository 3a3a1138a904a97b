//! Outcome aggregation over systolic pressure bins

use serde::{Deserialize, Serialize};
use survey_core::WeightedSample;
use survey_histogram::{BinEdges, WeightedBinner, WeightedHistogram};
use tracing::debug;

use crate::config::{ColumnConfig, OutcomeKind, OutcomeQuery};
use crate::dataset::SurveyFrame;
use crate::{Error, Result};

/// Per-bin aggregate of one outcome
///
/// Categorical outcomes hold the weighted proportion of the outcome in each
/// bin, numeric outcomes the weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedOutcome {
    pub outcome: String,
    pub kind: OutcomeKind,
    pub histogram: WeightedHistogram,
}

/// Bin visits by triage systolic pressure and aggregate `query` per bin
///
/// Visits without a systolic measurement are left out. Categorical outcomes
/// drop visits with a missing outcome; numeric outcomes drop them inside the
/// average, so a bin with only missing values carries no value.
pub fn outcome_by_systolic_bins(
    frame: &SurveyFrame<'_>,
    columns: &ColumnConfig,
    query: &OutcomeQuery,
    edges: &BinEdges,
) -> Result<BinnedOutcome> {
    let systolic = frame.continuous(&columns.systolic)?;
    let weights = frame.weights().as_slice();
    let binner = WeightedBinner::new(edges.clone());

    let histogram = match query.kind {
        OutcomeKind::Categorical => {
            let values = frame.binary(&query.outcome)?;
            let mut keys = Vec::new();
            let mut sample = WeightedSample::new();
            for ((sbp, value), &weight) in systolic.iter().zip(&values).zip(weights) {
                if let (Some(sbp), Some(value)) = (sbp, value) {
                    keys.push(*sbp);
                    sample.push(*value, weight);
                }
            }
            binner.proportions(&keys, &sample)
        }
        OutcomeKind::Numeric => {
            let values = frame.continuous(&query.outcome)?;
            let mut keys = Vec::new();
            let mut sample = WeightedSample::new();
            for ((sbp, value), &weight) in systolic.iter().zip(&values).zip(weights) {
                if let Some(sbp) = sbp {
                    keys.push(*sbp);
                    sample.push(value.unwrap_or(f64::NAN), weight);
                }
            }
            binner.averages(&keys, &sample)
        }
    }
    .map_err(Error::estimator(&query.outcome, "systolic binning"))?;

    debug!(
        outcome = %query.outcome,
        binned = histogram.total_count(),
        "aggregated outcome by systolic bins"
    );
    Ok(BinnedOutcome {
        outcome: query.outcome.clone(),
        kind: query.kind,
        histogram,
    })
}
