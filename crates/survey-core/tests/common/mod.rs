//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use survey_core::WeightedSample;

pub const EPSILON: f64 = 1e-10;

/// Unit weights for `n` records
pub fn unit_weights(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

/// Indicator sample from 0/1 codes
pub fn indicator_sample(codes: &[u8], weights: &[f64]) -> WeightedSample<bool> {
    let values: Vec<bool> = codes.iter().map(|&c| c == 1).collect();
    WeightedSample::from_parts(&values, weights).unwrap()
}

/// Unweighted share of ones
pub fn unweighted_share(codes: &[u8]) -> f64 {
    codes.iter().filter(|&&c| c == 1).count() as f64 / codes.len() as f64
}
