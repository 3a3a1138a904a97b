//! Per-year weighted summaries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use survey_confidence::{weighted_mean_and_ci, weighted_proportion_ci, ConfidenceInterval};
use survey_core::{weighted_mean_and_std, WeightedSample};
use tracing::debug;

use crate::config::ColumnConfig;
use crate::dataset::SurveyFrame;
use crate::exposure::ExposureDefinition;
use crate::{Error, Result};

/// Weighted mean and population standard deviation for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyMoments {
    pub year: i64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Point estimate and interval for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyInterval {
    pub year: i64,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl YearlyInterval {
    fn new(year: i64, interval: &ConfidenceInterval) -> Self {
        Self {
            year,
            estimate: interval.estimate,
            lower: interval.lower,
            upper: interval.upper,
        }
    }
}

/// Yearly summary of one blood pressure measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureTrend {
    pub measure: String,
    pub year: i64,
    pub mean: f64,
    pub std_dev: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Group a full-length column by year; visits without a year are skipped
fn by_year<T: Clone>(
    frame: &SurveyFrame<'_>,
    year_column: &str,
    values: &[T],
) -> Result<BTreeMap<i64, WeightedSample<T>>> {
    let years = frame.years(year_column)?;
    let mut groups: BTreeMap<i64, WeightedSample<T>> = BTreeMap::new();
    for ((year, value), &weight) in years.iter().zip(values).zip(frame.weights().as_slice()) {
        if let Some(year) = year {
            groups.entry(*year).or_default().push(value.clone(), weight);
        }
    }
    debug!(column = year_column, years = groups.len(), "grouped visits by year");
    Ok(groups)
}

fn continuous_by_year(
    frame: &SurveyFrame<'_>,
    year_column: &str,
    value_column: &str,
) -> Result<BTreeMap<i64, WeightedSample<f64>>> {
    let values: Vec<f64> = frame
        .continuous(value_column)?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    by_year(frame, year_column, &values)
}

/// Weighted mean and standard deviation of `value_column` per year
pub fn weighted_mean_std_by_year(
    frame: &SurveyFrame<'_>,
    year_column: &str,
    value_column: &str,
) -> Result<Vec<YearlyMoments>> {
    continuous_by_year(frame, year_column, value_column)?
        .into_iter()
        .map(|(year, sample)| {
            let moments = weighted_mean_and_std(&sample)
                .map_err(Error::estimator(value_column, "weighted_mean_and_std"))?;
            Ok(YearlyMoments {
                year,
                mean: moments.mean,
                std_dev: moments.std_dev,
            })
        })
        .collect()
}

/// Weighted mean of `value_column` per year with a Student-t interval
pub fn weighted_mean_ci_by_year(
    frame: &SurveyFrame<'_>,
    year_column: &str,
    value_column: &str,
    confidence_level: f64,
) -> Result<Vec<YearlyInterval>> {
    continuous_by_year(frame, year_column, value_column)?
        .into_iter()
        .map(|(year, sample)| {
            let interval = weighted_mean_and_ci(&sample, confidence_level)
                .map_err(Error::estimator(value_column, "weighted_mean_and_ci"))?;
            Ok(YearlyInterval::new(year, &interval))
        })
        .collect()
}

/// Weighted share of exposed visits per year with a Wilson interval
pub fn exposure_proportion_by_year(
    frame: &SurveyFrame<'_>,
    year_column: &str,
    exposure: &ExposureDefinition,
    confidence_level: f64,
) -> Result<Vec<YearlyInterval>> {
    let exposed = exposure.classify();
    by_year(frame, year_column, &exposed)?
        .into_iter()
        .map(|(year, sample)| {
            let interval = weighted_proportion_ci(&sample, confidence_level)
                .map_err(Error::estimator("exposure", "weighted_proportion_ci"))?;
            Ok(YearlyInterval::new(year, &interval))
        })
        .collect()
}

/// Yearly mean, spread and mean interval of triage systolic and diastolic pressure
pub fn pressure_trends(
    frame: &SurveyFrame<'_>,
    columns: &ColumnConfig,
    confidence_level: f64,
) -> Result<Vec<PressureTrend>> {
    let mut trends = Vec::new();
    for measure in [&columns.systolic, &columns.diastolic] {
        let moments = weighted_mean_std_by_year(frame, &columns.year, measure)?;
        let intervals = weighted_mean_ci_by_year(frame, &columns.year, measure, confidence_level)?;
        trends.extend(moments.into_iter().zip(intervals).map(|(m, ci)| PressureTrend {
            measure: measure.clone(),
            year: m.year,
            mean: m.mean,
            std_dev: m.std_dev,
            lower: ci.lower,
            upper: ci.upper,
        }));
    }
    Ok(trends)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cutoff;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df![
            "PATWT" => [1.0, 1.0, 2.0, 1.0, 1.0, 1.0],
            "YEAR" => [Some(2016i64), Some(2016), Some(2016), Some(2015), Some(2015), None],
            "BPSYS" => [Some(120.0), Some(150.0), Some(200.0), Some(130.0), None, Some(300.0)],
            "BPDIAS" => [80.0, 85.0, 120.0, 70.0, 75.0, 100.0],
            "BPSYSD" => [None::<f64>, None, None, None, None, None],
            "BPDIASD" => [None::<f64>, None, None, None, None, None],
        ]
        .unwrap()
    }

    #[test]
    fn test_years_are_sorted_and_missing_year_skipped() {
        let df = frame();
        let survey = SurveyFrame::new(&df, "PATWT").unwrap();
        let moments = weighted_mean_std_by_year(&survey, "YEAR", "BPDIAS").unwrap();

        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].year, 2015);
        assert_relative_eq!(moments[0].mean, 72.5);
        assert_relative_eq!(moments[0].std_dev, 2.5);
        assert_eq!(moments[1].year, 2016);
        // (80 + 85 + 2 * 120) / 4
        assert_relative_eq!(moments[1].mean, 101.25);
    }

    #[test]
    fn test_single_visit_year_has_no_interval() {
        let df = frame();
        let survey = SurveyFrame::new(&df, "PATWT").unwrap();
        // 2015 keeps one systolic value with weight 1, so df = 0
        let result = weighted_mean_ci_by_year(&survey, "YEAR", "BPSYS", 0.95);
        assert!(matches!(result, Err(Error::Estimator { .. })));
    }

    #[test]
    fn test_exposure_share_per_year() {
        let df = frame();
        let survey = SurveyFrame::new(&df, "PATWT").unwrap();
        let exposure = ExposureDefinition::from_survey_frame(
            &survey,
            Cutoff::new(140.0, 90.0),
            &ColumnConfig::default(),
        )
        .unwrap();
        let shares = exposure_proportion_by_year(&survey, "YEAR", &exposure, 0.95).unwrap();

        assert_eq!(shares.len(), 2);
        assert_relative_eq!(shares[0].estimate, 0.0);
        // 150 and 200 (weight 2) out of weight 4
        assert_relative_eq!(shares[1].estimate, 0.75);
        assert!(shares[1].lower < 0.75 && shares[1].upper > 0.75);
    }
}
