//! Pearson chi-square test of independence

use serde::{Deserialize, Serialize};
use survey_core::math::distributions::chi_squared;
use survey_core::{Error, Result, WeightedSample};
use tracing::trace;

/// Result of a chi-square test of independence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareTest {
    pub statistic: f64,
    /// Degrees of freedom, `(rows - 1) * (columns - 1)`
    pub dof: usize,
    pub p_value: f64,
}

/// Chi-square test of independence on an `r × c` table of observed counts
///
/// With `correction` set and exactly one degree of freedom, Yates' continuity
/// correction moves every observed cell towards its expected value by
/// `min(0.5, |observed - expected|)`. A table with zero degrees of freedom
/// yields a statistic of 0 and a p-value of 1. Any zero expected frequency is
/// rejected with `InvalidDomain`.
pub fn chi_square_test<R>(observed: &[R], correction: bool) -> Result<ChiSquareTest>
where
    R: AsRef<[f64]>,
{
    let n_rows = observed.len();
    let n_cols = observed.first().map_or(0, |r| r.as_ref().len());
    if n_rows == 0 || n_cols == 0 {
        return Err(Error::InvalidDomain(
            "chi-square test needs a non-empty table".to_string(),
        ));
    }
    if let Some(bad) = observed.iter().find(|r| r.as_ref().len() != n_cols) {
        return Err(Error::size_mismatch(
            bad.as_ref().len(),
            n_cols,
            "chi-square table row",
        ));
    }
    if observed
        .iter()
        .flat_map(|r| r.as_ref())
        .any(|&x| !x.is_finite() || x < 0.0)
    {
        return Err(Error::InvalidDomain(
            "observed frequencies must be finite and non-negative".to_string(),
        ));
    }

    let row_totals: Vec<f64> = observed.iter().map(|r| r.as_ref().iter().sum()).collect();
    let col_totals: Vec<f64> = (0..n_cols)
        .map(|j| observed.iter().map(|r| r.as_ref()[j]).sum())
        .collect();
    let total: f64 = row_totals.iter().sum();

    let expected = |i: usize, j: usize| row_totals[i] * col_totals[j] / total;
    for i in 0..n_rows {
        for j in 0..n_cols {
            let e = expected(i, j);
            if !(e > 0.0) {
                return Err(Error::InvalidDomain(format!(
                    "chi-square table has a zero expected frequency at ({i}, {j})"
                )));
            }
        }
    }

    let dof = (n_rows - 1) * (n_cols - 1);
    if dof == 0 {
        return Ok(ChiSquareTest {
            statistic: 0.0,
            dof,
            p_value: 1.0,
        });
    }

    let yates = correction && dof == 1;
    let mut statistic = 0.0;
    for (i, row) in observed.iter().enumerate() {
        for (j, &obs) in row.as_ref().iter().enumerate() {
            let e = expected(i, j);
            let mut diff = (obs - e).abs();
            if yates {
                diff -= diff.min(0.5);
            }
            statistic += diff * diff / e;
        }
    }

    let p_value = chi_squared::sf(statistic, dof)?;
    trace!(statistic, dof, p_value, yates, "chi-square test");

    Ok(ChiSquareTest {
        statistic,
        dof,
        p_value,
    })
}

/// p-value of a weighted 2×2 chi-square test between two indicator samples
///
/// The table is `[[true1, false1], [true2, false2]]` of weighted counts and
/// Yates' continuity correction is applied.
pub fn weighted_chi2(sample1: &WeightedSample<bool>, sample2: &WeightedSample<bool>) -> Result<f64> {
    let row = |s: &WeightedSample<bool>| {
        let positive = s.positive_weight();
        [positive, s.total_weight() - positive]
    };
    let table = [row(sample1), row(sample2)];
    Ok(chi_square_test(&table, true)?.p_value)
}
