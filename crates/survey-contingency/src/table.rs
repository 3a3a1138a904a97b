//! Two-column contingency tables over a shared label set

use serde::{Deserialize, Serialize};
use survey_core::{CategoricalSeries, Result, SurveyWeights};

use crate::chi_square::{chi_square_test, ChiSquareTest};

/// Per-category totals of two series, `categories × 2`
///
/// Column 0 belongs to the first series and column 1 to the second. Counts
/// are `f64` so weighted and unweighted tables share one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    categories: Vec<String>,
    counts: Vec<[f64; 2]>,
}

impl ContingencyTable {
    /// Build a table directly from per-category counts
    pub fn new(categories: Vec<String>, counts: Vec<[f64; 2]>) -> Result<Self> {
        if categories.len() != counts.len() {
            return Err(survey_core::Error::size_mismatch(
                counts.len(),
                categories.len(),
                "contingency table",
            ));
        }
        Ok(Self { categories, counts })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Rows of the table, one per category
    pub fn counts(&self) -> &[[f64; 2]] {
        &self.counts
    }

    /// Counts for one label, if it is a known category
    pub fn get(&self, label: &str) -> Option<[f64; 2]> {
        self.categories
            .iter()
            .position(|c| c == label)
            .map(|i| self.counts[i])
    }

    /// Column totals
    pub fn column_totals(&self) -> [f64; 2] {
        self.counts
            .iter()
            .fold([0.0, 0.0], |acc, row| [acc[0] + row[0], acc[1] + row[1]])
    }

    /// Chi-square test of independence between category and column
    pub fn chi_square(&self, correction: bool) -> Result<ChiSquareTest> {
        chi_square_test(&self.counts, correction)
    }
}

/// Weighted contingency table of two categorical series
///
/// Both series must carry the identical ordered label set, and every row id
/// in either series must have a weight. Each cell is the summed weight of the
/// rows holding that category.
pub fn weighted_contingency(
    series1: &CategoricalSeries,
    series2: &CategoricalSeries,
    weights: &SurveyWeights,
) -> Result<ContingencyTable> {
    series1.check_same_categories(series2)?;
    tabulate(series1, series2, |row| weights.get(row))
}

/// Unweighted contingency table of two categorical series
pub fn contingency(
    series1: &CategoricalSeries,
    series2: &CategoricalSeries,
) -> Result<ContingencyTable> {
    series1.check_same_categories(series2)?;
    tabulate(series1, series2, |_| Ok(1.0))
}

fn tabulate<F>(
    series1: &CategoricalSeries,
    series2: &CategoricalSeries,
    mut weight_of: F,
) -> Result<ContingencyTable>
where
    F: FnMut(usize) -> Result<f64>,
{
    let categories = series1.categories().to_vec();
    let mut counts = vec![[0.0; 2]; categories.len()];

    for (column, series) in [series1, series2].into_iter().enumerate() {
        for (row, label) in series.iter() {
            // Every row must be weighted even when its label is missing
            let weight = weight_of(row)?;
            let Some(label) = label else { continue };
            if let Some(i) = categories.iter().position(|c| c == label) {
                counts[i][column] += weight;
            }
        }
    }

    Ok(ContingencyTable { categories, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::Error;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn series(name: &str, cats: &[&str], rows: &[(usize, Option<&'static str>)]) -> CategoricalSeries {
        CategoricalSeries::from_labels(name, labels(cats), rows.iter().copied()).unwrap()
    }

    #[test]
    fn test_unweighted_contingency() {
        let cats = ["a", "b", "c"];
        let s1 = series("x", &cats, &[(0, Some("a")), (1, Some("a")), (2, Some("b"))]);
        let s2 = series("x", &cats, &[(3, Some("b")), (4, None), (5, Some("b"))]);

        let table = contingency(&s1, &s2).unwrap();
        assert_eq!(table.get("a"), Some([2.0, 0.0]));
        assert_eq!(table.get("b"), Some([1.0, 2.0]));
        assert_eq!(table.get("c"), Some([0.0, 0.0]));
        assert_eq!(table.get("d"), None);
        assert_eq!(table.column_totals(), [3.0, 2.0]);
    }

    #[test]
    fn test_weighted_contingency_missing_weight() {
        let cats = ["a", "b"];
        let s1 = series("x", &cats, &[(0, Some("a"))]);
        let s2 = series("x", &cats, &[(7, Some("b"))]);
        let weights = SurveyWeights::new(vec![1.0, 2.0]).unwrap();

        assert_eq!(
            weighted_contingency(&s1, &s2, &weights),
            Err(Error::MissingWeight { row: 7 })
        );
    }

    #[test]
    fn test_weighted_contingency_category_mismatch() {
        let s1 = series("x", &["a", "b"], &[(0, Some("a"))]);
        let s2 = series("x", &["b", "a"], &[(1, Some("a"))]);
        let weights = SurveyWeights::new(vec![1.0, 1.0]).unwrap();

        assert!(matches!(
            weighted_contingency(&s1, &s2, &weights),
            Err(Error::CategoryMismatch { .. })
        ));
    }

    #[test]
    fn test_new_checks_shape() {
        assert!(ContingencyTable::new(labels(&["a"]), vec![[1.0, 2.0], [3.0, 4.0]]).is_err());
    }
}
