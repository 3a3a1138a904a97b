//! Core traits for per-bin aggregation

use survey_core::{Result, WeightedSample};

/// Reduces the records of one bin to a single value
pub trait BinAggregator<T> {
    /// Aggregate a bin; `Ok(None)` marks a bin with nothing to aggregate
    fn aggregate(&self, bin: &WeightedSample<T>) -> Result<Option<f64>>;
}
