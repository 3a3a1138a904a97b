//! Shared utilities for integration tests

#![allow(dead_code)]

use survey_core::{CategoricalSeries, RowId};

pub const REGIONS: [&str; 4] = ["South", "West", "Midwest", "Northeast"];

pub fn regions() -> Vec<String> {
    REGIONS.iter().map(|s| s.to_string()).collect()
}

/// Region series over explicit row ids
pub fn region_series(rows: &[(RowId, &'static str)]) -> CategoricalSeries {
    CategoricalSeries::from_labels(
        "REGION",
        regions(),
        rows.iter().map(|&(row, label)| (row, Some(label))),
    )
    .unwrap()
}
