//! Typed column access over a Polars `DataFrame`

use polars::prelude::*;
use survey_core::{CategoricalSeries, SurveyWeights};

use crate::{Error, Result};

/// A visit-level `DataFrame` together with its validated survey weights
///
/// Row ids are positions in the frame, so every column read here lines up
/// with [`SurveyWeights`].
#[derive(Debug, Clone)]
pub struct SurveyFrame<'a> {
    frame: &'a DataFrame,
    weights: SurveyWeights,
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_float() || dtype.is_integer() || *dtype == DataType::Boolean
}

impl<'a> SurveyFrame<'a> {
    /// Read and validate the weight column
    ///
    /// A null weight fails with `MissingWeight`; a negative or non-finite
    /// weight with `InvalidDomain`.
    pub fn new(frame: &'a DataFrame, weight_column: &str) -> Result<Self> {
        let raw = Self::read_f64(frame, weight_column)?;
        let weights = raw
            .into_iter()
            .enumerate()
            .map(|(row, w)| w.ok_or(survey_core::Error::MissingWeight { row }))
            .collect::<survey_core::Result<Vec<f64>>>()?;
        let weights = SurveyWeights::new(weights)?;

        Ok(Self { frame, weights })
    }

    pub fn frame(&self) -> &DataFrame {
        self.frame
    }

    pub fn weights(&self) -> &SurveyWeights {
        &self.weights
    }

    /// Number of visits
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    fn read_f64(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
        let column = frame
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.to_string()))?;
        if !is_numeric(column.dtype()) {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: "numeric".to_string(),
                got: format!("{:?}", column.dtype()),
            });
        }
        let float_column = column.cast(&DataType::Float64)?;
        Ok(float_column
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Continuous column; nulls and NaN become `None`
    pub fn continuous(&self, name: &str) -> Result<Vec<Option<f64>>> {
        Self::read_f64(self.frame, name)
    }

    /// Binary column; every non-missing value must be 0 or 1
    ///
    /// Boolean columns are accepted as-is. Any other value fails with
    /// `SchemaViolation`; values are never coerced.
    pub fn binary(&self, name: &str) -> Result<Vec<Option<bool>>> {
        let values = self.continuous(name)?;
        let mut invalid: Vec<f64> = Vec::new();
        let flags: Vec<Option<bool>> = values
            .iter()
            .map(|v| {
                v.map(|x| {
                    if x != 0.0 && x != 1.0 && !invalid.contains(&x) {
                        invalid.push(x);
                    }
                    x == 1.0
                })
            })
            .collect();
        if !invalid.is_empty() {
            return Err(survey_core::Error::not_binary(name, &invalid).into());
        }
        Ok(flags)
    }

    /// Year column as integers
    pub fn years(&self, name: &str) -> Result<Vec<Option<i64>>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.to_string()))?;
        let int_column = column.cast(&DataType::Int64)?;
        Ok(int_column.i64()?.into_iter().collect())
    }

    /// Categorical column over all rows
    ///
    /// The label set is the sorted set of distinct non-missing values. Numeric
    /// columns are sorted numerically and labelled with their shortest
    /// decimal form (`1`, `2.5`).
    pub fn categorical(&self, name: &str) -> Result<CategoricalSeries> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.to_string()))?;

        let (labels, categories): (Vec<Option<String>>, Vec<String>) =
            if is_numeric(column.dtype()) {
                let values = self.continuous(name)?;
                let mut distinct: Vec<f64> = values.iter().flatten().copied().collect();
                distinct.sort_by(f64::total_cmp);
                distinct.dedup();
                (
                    values.iter().map(|v| v.map(|x| x.to_string())).collect(),
                    distinct.iter().map(f64::to_string).collect(),
                )
            } else {
                let string_column = column.cast(&DataType::String)?;
                let labels: Vec<Option<String>> = string_column
                    .str()?
                    .into_iter()
                    .map(|v| v.map(str::to_string))
                    .collect();
                let mut distinct: Vec<String> = labels.iter().flatten().cloned().collect();
                distinct.sort();
                distinct.dedup();
                (labels, distinct)
            };

        let series = CategoricalSeries::from_labels(
            name,
            categories,
            labels.iter().enumerate().map(|(row, l)| (row, l.as_deref())),
        )?;
        Ok(series)
    }
}
