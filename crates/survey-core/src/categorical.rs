//! Row-keyed categorical series with an explicit ordered label set

use crate::{Error, Result, RowId};

/// A categorical column (or a subset of one) keyed by row id
///
/// Every entry is either a code into `categories` or missing. Two series cut
/// from the same column share the same `categories`, which is what makes
/// their weighted contingency table well defined.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSeries {
    name: String,
    categories: Vec<String>,
    entries: Vec<(RowId, Option<usize>)>,
}

impl CategoricalSeries {
    /// Build a series from labels
    ///
    /// Fails with `SchemaViolation` if a label is not one of `categories`.
    pub fn from_labels<'a, I>(name: &str, categories: Vec<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RowId, Option<&'a str>)>,
    {
        let mut entries = Vec::new();
        for (row, label) in labels {
            let code = match label {
                Some(label) => Some(
                    categories
                        .iter()
                        .position(|c| c == label)
                        .ok_or_else(|| {
                            Error::SchemaViolation(format!(
                                "{name}: label {label:?} is not one of {categories:?}"
                            ))
                        })?,
                ),
                None => None,
            };
            entries.push((row, code));
        }

        Ok(Self {
            name: name.to_string(),
            categories,
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(row, label)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (RowId, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|&(row, code)| (row, code.map(|c| self.categories[c].as_str())))
    }

    /// Row ids in this series
    pub fn rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.entries.iter().map(|&(row, _)| row)
    }

    /// Keep the entries whose row satisfies `predicate`; categories are kept
    pub fn subset<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(RowId) -> bool,
    {
        Self {
            name: self.name.clone(),
            categories: self.categories.clone(),
            entries: self
                .entries
                .iter()
                .filter(|&&(row, _)| predicate(row))
                .copied()
                .collect(),
        }
    }

    /// Indicator of `label` for every entry (`false` for missing entries)
    pub fn indicator(&self, label: &str) -> impl Iterator<Item = (RowId, bool)> + '_ {
        let code = self.categories.iter().position(|c| c == label);
        self.entries
            .iter()
            .map(move |&(row, c)| (row, code.is_some() && c == code))
    }

    /// Labels that actually occur, in order of first appearance
    pub fn observed_labels(&self) -> Vec<&str> {
        let mut seen = vec![false; self.categories.len()];
        let mut labels = Vec::new();
        for &(_, code) in &self.entries {
            if let Some(c) = code {
                if !seen[c] {
                    seen[c] = true;
                    labels.push(self.categories[c].as_str());
                }
            }
        }
        labels
    }

    /// Ensure `other` carries the identical ordered label set
    pub fn check_same_categories(&self, other: &Self) -> Result<()> {
        if self.categories != other.categories {
            return Err(Error::CategoryMismatch {
                left: self.categories.clone(),
                right: other.categories.clone(),
            });
        }
        Ok(())
    }
}
