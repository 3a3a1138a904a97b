//! Core types for binned aggregates

use serde::{Deserialize, Serialize};
use std::fmt;
use survey_core::{Error, Result};

/// Systolic blood pressure bin edges in mmHg
pub const SYSTOLIC_EDGES: [f64; 10] = [
    60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 300.0,
];

/// Strictly increasing bin edges defining right-closed bins `(a, b]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BinEdges(Vec<f64>);

impl BinEdges {
    /// Validate edges: at least two, finite and strictly increasing
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidDomain(format!(
                "bins need at least two edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::InvalidDomain(format!(
                "bin edges must be finite: {edges:?}"
            )));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidDomain(format!(
                "bin edges must be strictly increasing: {edges:?}"
            )));
        }
        Ok(Self(edges))
    }

    /// Edges used for outcome-by-systolic-pressure plots
    pub fn systolic() -> Self {
        Self(SYSTOLIC_EDGES.to_vec())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.0.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bin index of `value`, or `None` if it falls outside every bin
    ///
    /// The lowest edge itself is outside: bins are `(a, b]`.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let edges = &self.0;
        if value.is_nan() || value <= edges[0] || value > edges[edges.len() - 1] {
            return None;
        }
        // First edge that is >= value closes the bin
        let upper = edges.partition_point(|&e| e < value);
        Some(upper - 1)
    }

    /// `(left, right)` of bin `index`
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        (self.0[index], self.0[index + 1])
    }
}

impl Default for BinEdges {
    fn default() -> Self {
        Self::systolic()
    }
}

impl TryFrom<Vec<f64>> for BinEdges {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::new(edges)
    }
}

impl From<BinEdges> for Vec<f64> {
    fn from(edges: BinEdges) -> Self {
        edges.0
    }
}

/// A single bin with its weighted aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedBin {
    /// Left edge of the bin (exclusive)
    pub left: f64,
    /// Right edge of the bin (inclusive)
    pub right: f64,
    /// Number of records that fell in the bin
    pub count: usize,
    /// Summed weight of those records
    pub weight: f64,
    /// Aggregate over the bin; `None` when nothing could be aggregated
    pub value: Option<f64>,
}

impl WeightedBin {
    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin
    pub fn contains(&self, value: f64) -> bool {
        value > self.left && value <= self.right
    }

    /// Interval label such as `(60, 80]`
    pub fn label(&self) -> String {
        format!("({}, {}]", self.left, self.right)
    }
}

impl fmt::Display for WeightedBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}: {:.3} (n={})", self.label(), v, self.count),
            None => write!(f, "{}: - (n={})", self.label(), self.count),
        }
    }
}

/// Ordered bins with one weighted aggregate each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedHistogram {
    bins: Vec<WeightedBin>,
}

impl WeightedHistogram {
    pub fn new(bins: Vec<WeightedBin>) -> Self {
        Self { bins }
    }

    /// Get the bins
    pub fn bins(&self) -> &[WeightedBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Aggregates in bin order
    pub fn values(&self) -> Vec<Option<f64>> {
        self.bins.iter().map(|bin| bin.value).collect()
    }

    /// Records per bin
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Records that fell inside any bin
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.left).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.right);
        }
        edges
    }
}

impl fmt::Display for WeightedHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeightedHistogram({} bins, n={})",
            self.len(),
            self.total_count()
        )
    }
}
