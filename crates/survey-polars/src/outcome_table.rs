//! Outcome comparison by exposure group

use serde::{Deserialize, Serialize};
use survey_core::{weighted_mean_and_std, Error as CoreError, WeightedSample, MILLIONS};
use survey_effect::{weighted_mean_difference_and_ci, weighted_relative_risk, EffectEstimate};
use tracing::{debug, info, warn};

use crate::config::{MeanDisplay, OutcomeKind, OutcomeQuery};
use crate::dataset::SurveyFrame;
use crate::exposure::ExposureDefinition;
use crate::{Error, Result};

/// Key of the first row of an [`OutcomeComparisonTable`]
pub const TOTAL_KEY: &str = "TOTAL";

/// Placeholder rendered for absent values
pub const MISSING_MARKER: &str = "-";

/// Writes `None` as [`MISSING_MARKER`] and reads it back
mod dash {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MISSING_MARKER;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_str(MISSING_MARKER),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Field::deserialize(deserializer)? {
            Field::Number(v) => Ok(Some(v)),
            Field::Text(s) if s == MISSING_MARKER || s.is_empty() => Ok(None),
            Field::Text(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// One row of an outcome comparison table
///
/// The group columns are display strings: population in millions on the
/// totals row, `count (pct%)` for categorical outcomes and the group mean
/// for numeric outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRow {
    pub key: String,
    /// Outcome kind, or `-` on the totals row
    pub kind: String,
    pub not_exposed: String,
    pub exposed: String,
    #[serde(with = "dash")]
    pub effect: Option<f64>,
    #[serde(with = "dash")]
    pub lower: Option<f64>,
    #[serde(with = "dash")]
    pub upper: Option<f64>,
}

impl OutcomeRow {
    fn with_effect(
        query: &OutcomeQuery,
        not_exposed: String,
        exposed: String,
        effect: &EffectEstimate,
    ) -> Self {
        Self {
            key: query.outcome.clone(),
            kind: query.kind.to_string(),
            not_exposed,
            exposed,
            effect: Some(effect.estimate),
            lower: Some(effect.lower()),
            upper: Some(effect.upper()),
        }
    }
}

/// Weighted comparison of outcomes between exposure groups
///
/// Categorical outcomes are compared by relative risk (exposed against not
/// exposed), numeric outcomes by the difference of weighted means (exposed
/// minus not exposed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeComparisonTable {
    rows: Vec<OutcomeRow>,
}

impl OutcomeComparisonTable {
    pub fn build(
        frame: &SurveyFrame<'_>,
        exposure: &ExposureDefinition,
        queries: &[OutcomeQuery],
        mean_display: MeanDisplay,
    ) -> Result<Self> {
        let weights = frame.weights();
        if exposure.len() != weights.len() {
            return Err(CoreError::size_mismatch(exposure.len(), weights.len(), "exposure").into());
        }
        let missing = exposure.missing_measurements();
        if missing > 0 {
            warn!(
                missing,
                cutoff = %exposure.cutoff(),
                "visits without a triage measurement are counted as not exposed"
            );
        }

        let exposed = exposure.classify();
        let groups = GroupTotals {
            not_exposed: weights.masked_total(&exposed, false)?,
            exposed: weights.masked_total(&exposed, true)?,
        };

        let mut rows = vec![OutcomeRow {
            key: TOTAL_KEY.to_string(),
            kind: MISSING_MARKER.to_string(),
            not_exposed: format!("{:.2}", groups.not_exposed / MILLIONS),
            exposed: format!("{:.2}", groups.exposed / MILLIONS),
            effect: None,
            lower: None,
            upper: None,
        }];

        for query in queries {
            debug!(outcome = %query.outcome, kind = %query.kind, "processing outcome query");
            let row = match query.kind {
                OutcomeKind::Categorical => categorical_row(frame, &exposed, &groups, query)?,
                OutcomeKind::Numeric => numeric_row(frame, &exposed, query, mean_display)?,
            };
            rows.push(row);
        }

        info!(
            cutoff = %exposure.cutoff(),
            rows = rows.len(),
            "built outcome comparison table"
        );
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[OutcomeRow] {
        &self.rows
    }

    /// Row by key
    pub fn get(&self, key: &str) -> Option<&OutcomeRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Summed weight of each exposure group over all visits
struct GroupTotals {
    not_exposed: f64,
    exposed: f64,
}

/// `count (pct%)` with the count in millions
///
/// The percentage is taken against the whole group, including visits where
/// the outcome is missing.
fn count_and_share(sample: &WeightedSample<bool>, group_weight: f64) -> String {
    let count = sample.positive_weight();
    let pct = if group_weight > 0.0 {
        100.0 * count / group_weight
    } else {
        0.0
    };
    format!("{:.1} ({:.1}%)", count / MILLIONS, pct)
}

fn categorical_row(
    frame: &SurveyFrame<'_>,
    exposed: &[bool],
    groups: &GroupTotals,
    query: &OutcomeQuery,
) -> Result<OutcomeRow> {
    let values = frame.binary(&query.outcome)?;
    let (not_exposed, with_exposure) = frame.weights().partition(&values, exposed)?;
    let effect = weighted_relative_risk(&not_exposed, &with_exposure)
        .map_err(Error::estimator(&query.outcome, "weighted_relative_risk"))?;

    Ok(OutcomeRow::with_effect(
        query,
        count_and_share(&not_exposed, groups.not_exposed),
        count_and_share(&with_exposure, groups.exposed),
        &effect,
    ))
}

fn display_mean(
    sample: &WeightedSample<f64>,
    mean_display: MeanDisplay,
    outcome: &str,
) -> Result<String> {
    let mean = match mean_display {
        MeanDisplay::Unweighted => {
            let n = sample.len();
            if n == 0 {
                return Err(Error::Estimator {
                    variable: outcome.to_string(),
                    estimator: "mean",
                    source: CoreError::zero_weight("display mean"),
                });
            }
            sample.values().sum::<f64>() / n as f64
        }
        MeanDisplay::Weighted => {
            weighted_mean_and_std(sample)
                .map_err(Error::estimator(outcome, "weighted_mean_and_std"))?
                .mean
        }
    };
    Ok(format!("{mean:.0}"))
}

fn numeric_row(
    frame: &SurveyFrame<'_>,
    exposed: &[bool],
    query: &OutcomeQuery,
    mean_display: MeanDisplay,
) -> Result<OutcomeRow> {
    let values = frame.continuous(&query.outcome)?;
    let (not_exposed, with_exposure) = frame.weights().partition(&values, exposed)?;
    let effect = weighted_mean_difference_and_ci(&not_exposed, &with_exposure)
        .map_err(Error::estimator(&query.outcome, "weighted_mean_difference_and_ci"))?;

    Ok(OutcomeRow::with_effect(
        query,
        display_mean(&not_exposed, mean_display, &query.outcome)?,
        display_mean(&with_exposure, mean_display, &query.outcome)?,
        &effect,
    ))
}
