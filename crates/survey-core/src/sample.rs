//! Paired value/weight records
//!
//! Every weighted estimator in the workspace consumes a [`WeightedSample`],
//! an ordered collection of `{value, weight}` records. Weights are attached to
//! their values when the sample is built, either from two parallel slices or
//! by looking rows up in [`SurveyWeights`] by row id.

use crate::{Error, Result};

/// Identifier of a row in the full dataset (its position in the frame)
pub type RowId = usize;

/// A single value together with its survey weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// An ordered collection of weighted records
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSample<T> {
    records: Vec<Weighted<T>>,
}

impl<T> Default for WeightedSample<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> WeightedSample<T> {
    /// Create an empty sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sample from already paired records
    pub fn from_records(records: Vec<Weighted<T>>) -> Self {
        Self { records }
    }

    /// Pair two parallel slices
    ///
    /// Fails with `DimensionMismatch` when the slices differ in length and
    /// with `InvalidDomain` when a weight is negative or not finite.
    pub fn from_parts(values: &[T], weights: &[f64]) -> Result<Self>
    where
        T: Clone,
    {
        if values.len() != weights.len() {
            return Err(Error::size_mismatch(
                values.len(),
                weights.len(),
                "weighted sample",
            ));
        }

        let mut records = Vec::with_capacity(values.len());
        for (row, (value, &weight)) in values.iter().zip(weights).enumerate() {
            check_weight(row, weight)?;
            records.push(Weighted::new(value.clone(), weight));
        }
        Ok(Self { records })
    }

    /// Add a record
    pub fn push(&mut self, value: T, weight: f64) {
        self.records.push(Weighted::new(value, weight));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Weighted<T>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Weighted<T>> {
        self.records.iter()
    }

    /// Iterate over the weights only
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.weight)
    }

    /// Sum of all weights in the sample
    pub fn total_weight(&self) -> f64 {
        self.weights().sum()
    }

    /// Keep the records whose value satisfies `predicate`
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(&r.value))
            .cloned()
            .collect()
    }

    /// Transform the values while keeping each record's weight
    pub fn map_values<U, F>(&self, mut f: F) -> WeightedSample<U>
    where
        F: FnMut(&T) -> U,
    {
        self.records
            .iter()
            .map(|r| Weighted::new(f(&r.value), r.weight))
            .collect()
    }
}

impl WeightedSample<f64> {
    /// Drop records whose value is missing (NaN), together with their weights
    pub fn drop_missing(&self) -> Self {
        self.filter(|v| !v.is_nan())
    }

    /// Iterate over the values only
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.value)
    }
}

impl WeightedSample<bool> {
    /// Sum of the weights of the records whose value is `true`
    pub fn positive_weight(&self) -> f64 {
        self.records
            .iter()
            .filter(|r| r.value)
            .map(|r| r.weight)
            .sum()
    }
}

impl<T> FromIterator<Weighted<T>> for WeightedSample<T> {
    fn from_iter<I: IntoIterator<Item = Weighted<T>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a WeightedSample<T> {
    type Item = &'a Weighted<T>;
    type IntoIter = std::slice::Iter<'a, Weighted<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn check_weight(row: RowId, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::invalid_weight(row, weight));
    }
    Ok(())
}

/// Per-row survey weights keyed by [`RowId`]
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyWeights {
    weights: Vec<f64>,
}

impl SurveyWeights {
    /// Validate and wrap one weight per dataset row
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        for (row, &weight) in weights.iter().enumerate() {
            check_weight(row, weight)?;
        }
        Ok(Self { weights })
    }

    /// Weight of a row, or `MissingWeight` if the row is unknown
    pub fn get(&self, row: RowId) -> Result<f64> {
        self.weights
            .get(row)
            .copied()
            .ok_or(Error::MissingWeight { row })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Sum the weights of the rows where `mask` equals `selected`
    pub fn masked_total(&self, mask: &[bool], selected: bool) -> Result<f64> {
        if mask.len() != self.weights.len() {
            return Err(Error::size_mismatch(
                mask.len(),
                self.weights.len(),
                "weight mask",
            ));
        }
        Ok(mask
            .iter()
            .zip(&self.weights)
            .filter(|&(&m, _)| m == selected)
            .map(|(_, &w)| w)
            .sum())
    }

    /// Attach weights to `(row, value)` pairs by row id
    pub fn gather<T, I>(&self, rows: I) -> Result<WeightedSample<T>>
    where
        I: IntoIterator<Item = (RowId, T)>,
    {
        rows.into_iter()
            .map(|(row, value)| Ok(Weighted::new(value, self.get(row)?)))
            .collect()
    }

    /// Split a full-length column into (not exposed, exposed) samples
    ///
    /// `values` and `exposed` must both hold one entry per dataset row.
    /// Rows whose value is `None` are left out of both samples.
    pub fn partition<T: Clone>(
        &self,
        values: &[Option<T>],
        exposed: &[bool],
    ) -> Result<(WeightedSample<T>, WeightedSample<T>)> {
        if values.len() != self.weights.len() {
            return Err(Error::size_mismatch(
                values.len(),
                self.weights.len(),
                "column partition",
            ));
        }
        if exposed.len() != self.weights.len() {
            return Err(Error::size_mismatch(
                exposed.len(),
                self.weights.len(),
                "exposure partition",
            ));
        }

        let mut not_exposed = WeightedSample::new();
        let mut with_exposure = WeightedSample::new();
        for ((value, &is_exposed), &weight) in values.iter().zip(exposed).zip(&self.weights) {
            let Some(value) = value else { continue };
            if is_exposed {
                with_exposure.push(value.clone(), weight);
            } else {
                not_exposed.push(value.clone(), weight);
            }
        }
        Ok((not_exposed, with_exposure))
    }
}
