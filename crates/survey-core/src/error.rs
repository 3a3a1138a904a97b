//! Error types for survey-weighted analysis
//!
//! Provides a unified error type for all survey-* crates. Every variant is a
//! data-contract violation; none of them are transient.

use crate::RowId;
use thiserror::Error;

/// Core error type for weighted statistical operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A column does not hold the values its kind promises
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Values and weights do not line up
    #[error("Dimension mismatch in {context}: {values} values but {weights} weights")]
    DimensionMismatch {
        context: String,
        values: usize,
        weights: usize,
    },

    /// A row referenced by a value series has no weight
    #[error("Missing weight for row {row}")]
    MissingWeight { row: RowId },

    /// A ratio, logarithm or quantile received an argument outside its domain
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Two categorical series do not share the same ordered label set
    #[error("Category mismatch: {left:?} vs {right:?}")]
    CategoryMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    /// A query kind tag is not one of the recognised values
    #[error("Unsupported query kind: {0}")]
    UnsupportedQueryKind(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a zero total weight
    pub fn zero_weight(context: &str) -> Self {
        Self::InvalidDomain(format!("{context}: total weight is zero"))
    }

    /// Create an error for values and weights of different length
    pub fn size_mismatch(values: usize, weights: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            values,
            weights,
        }
    }

    /// Create an error for a binary column holding something other than 0/1
    pub fn not_binary(column: &str, observed: &[f64]) -> Self {
        Self::SchemaViolation(format!(
            "{column} does not seem to be binary, observed values {observed:?}"
        ))
    }

    /// Create an error for an invalid survey weight
    pub fn invalid_weight(row: RowId, weight: f64) -> Self {
        Self::InvalidDomain(format!(
            "weight for row {row} must be finite and non-negative, got {weight}"
        ))
    }
}
