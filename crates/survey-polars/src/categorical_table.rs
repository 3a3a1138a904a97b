//! Baseline characteristics by exposure group

use serde::{Deserialize, Serialize};
use survey_contingency::{weighted_chi2, weighted_contingency};
use survey_core::{weighted_proportion, Error as CoreError, WeightedSample, MILLIONS};
use tracing::{debug, info, warn};

use crate::config::{CategoricalKind, CategoricalQuery};
use crate::dataset::SurveyFrame;
use crate::exposure::ExposureDefinition;
use crate::{Error, Result};

/// Key of the first row of a [`CategoricalComparisonTable`]
pub const TOTALS_KEY: &str = "TOTALS";

/// One row of a baseline characteristics table
///
/// Counts are summed survey weights in millions; proportions are weighted
/// shares within the total, not exposed and exposed populations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalRow {
    pub key: String,
    pub n_total: f64,
    pub n_not_exposed: f64,
    pub n_exposed: f64,
    pub proportion_total: f64,
    pub proportion_not_exposed: f64,
    pub proportion_exposed: f64,
    /// Chi-square p-value; `None` on the totals row
    pub p_value: Option<f64>,
}

/// Positive weight and proportion of an indicator sample
struct Share {
    count: f64,
    proportion: f64,
}

fn share(variable: &str, sample: &WeightedSample<bool>) -> Result<Share> {
    Ok(Share {
        count: sample.positive_weight() / MILLIONS,
        proportion: weighted_proportion(sample)
            .map_err(Error::estimator(variable, "weighted_proportion"))?,
    })
}

fn row(key: String, total: Share, not_exposed: Share, exposed: Share, p_value: f64) -> CategoricalRow {
    CategoricalRow {
        key,
        n_total: total.count,
        n_not_exposed: not_exposed.count,
        n_exposed: exposed.count,
        proportion_total: total.proportion,
        proportion_not_exposed: not_exposed.proportion,
        proportion_exposed: exposed.proportion,
        p_value: Some(p_value),
    }
}

/// Weighted comparison of baseline characteristics between exposure groups
///
/// Rows are the totals row followed by the queries in input order. A
/// binomial query adds one row keyed by the variable; a multinomial query
/// adds one row per observed label keyed `variable_label`, all sharing the
/// variable's p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalComparisonTable {
    rows: Vec<CategoricalRow>,
}

impl CategoricalComparisonTable {
    /// Build the table; the first failing query aborts the build
    pub fn build(
        frame: &SurveyFrame<'_>,
        exposure: &ExposureDefinition,
        queries: &[CategoricalQuery],
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
        let total = weights.total();
        let with_exposure = weights.masked_total(&exposed, true)?;
        let without_exposure = weights.masked_total(&exposed, false)?;
        if total <= 0.0 {
            return Err(CoreError::zero_weight("baseline totals").into());
        }

        let mut rows = vec![CategoricalRow {
            key: TOTALS_KEY.to_string(),
            n_total: total / MILLIONS,
            n_not_exposed: without_exposure / MILLIONS,
            n_exposed: with_exposure / MILLIONS,
            proportion_total: 1.0,
            proportion_not_exposed: without_exposure / total,
            proportion_exposed: with_exposure / total,
            p_value: None,
        }];

        for query in queries {
            debug!(variable = %query.variable, kind = %query.kind, "processing baseline query");
            match query.kind {
                CategoricalKind::Binomial => {
                    rows.push(binomial_row(frame, &exposed, &query.variable)?)
                }
                CategoricalKind::Multinomial => {
                    rows.extend(multinomial_rows(frame, &exposed, &query.variable)?)
                }
            }
        }

        info!(
            cutoff = %exposure.cutoff(),
            rows = rows.len(),
            "built baseline characteristics table"
        );
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CategoricalRow] {
        &self.rows
    }

    /// Row by key
    pub fn get(&self, key: &str) -> Option<&CategoricalRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn binomial_row(frame: &SurveyFrame<'_>, exposed: &[bool], variable: &str) -> Result<CategoricalRow> {
    let values = frame.binary(variable)?;
    let mut observed = [false; 2];
    for v in values.iter().flatten() {
        observed[usize::from(*v)] = true;
    }
    if observed != [true, true] {
        let seen: Vec<f64> = [0.0, 1.0]
            .into_iter()
            .zip(observed)
            .filter_map(|(code, seen)| seen.then_some(code))
            .collect();
        return Err(Error::Estimator {
            variable: variable.to_string(),
            estimator: "binomial query",
            source: CoreError::not_binary(variable, &seen),
        });
    }

    let weights = frame.weights();
    let (not_exposed, with_exposure) = weights.partition(&values, exposed)?;
    let total = weights.gather(
        values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.map(|v| (row, v))),
    )?;

    let p_value = weighted_chi2(&with_exposure, &not_exposed)
        .map_err(Error::estimator(variable, "weighted_chi2"))?;

    Ok(row(
        variable.to_string(),
        share(variable, &total)?,
        share(variable, &not_exposed)?,
        share(variable, &with_exposure)?,
        p_value,
    ))
}

fn multinomial_rows(
    frame: &SurveyFrame<'_>,
    exposed: &[bool],
    variable: &str,
) -> Result<Vec<CategoricalRow>> {
    let weights = frame.weights();
    let series = frame.categorical(variable)?;
    let with_exposure = series.subset(|row| exposed[row]);
    let not_exposed = series.subset(|row| !exposed[row]);

    let table = weighted_contingency(&with_exposure, &not_exposed, weights)
        .map_err(Error::estimator(variable, "weighted_contingency"))?;
    let p_value = table
        .chi_square(false)
        .map_err(Error::estimator(variable, "chi_square_test"))?
        .p_value;

    series
        .observed_labels()
        .into_iter()
        .map(|label| -> Result<CategoricalRow> {
            let total = weights.gather(series.indicator(label))?;
            let group_not_exposed = weights.gather(not_exposed.indicator(label))?;
            let group_exposed = weights.gather(with_exposure.indicator(label))?;
            Ok(row(
                format!("{variable}_{label}"),
                share(variable, &total)?,
                share(variable, &group_not_exposed)?,
                share(variable, &group_exposed)?,
                p_value,
            ))
        })
        .collect()
}
