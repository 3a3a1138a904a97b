//! Common test utilities for survey-polars tests

#![allow(dead_code)]

use polars::prelude::*;
use survey_polars::Cutoff;

/// Cutoff used by most fixtures: exposed rows are 0, 2, 5 and 7
pub const CUTOFF: Cutoff = Cutoff {
    systolic: 140.0,
    diastolic: 90.0,
};

/// Eight visits over two survey years
///
/// | row | weight | sbp | dbp | exposed |
/// |-----|--------|-----|-----|---------|
/// | 0   | 100k   | 150 | 80  | yes     |
/// | 1   | 200k   | 120 | 70  | no      |
/// | 2   | 150k   | 130 | 95  | yes     |
/// | 3   | 250k   | 110 | 60  | no      |
/// | 4   | 300k   | -   | -   | no      |
/// | 5   | 100k   | 160 | 100 | yes     |
/// | 6   | 200k   | 125 | 85  | no      |
/// | 7   | 100k   | 145 | 88  | yes     |
pub fn visits() -> DataFrame {
    df![
        "PATWT" => [100e3, 200e3, 150e3, 250e3, 300e3, 100e3, 200e3, 100e3],
        "BPSYS" => [Some(150.0), Some(120.0), Some(130.0), Some(110.0), None, Some(160.0), Some(125.0), Some(145.0)],
        "BPDIAS" => [Some(80.0), Some(70.0), Some(95.0), Some(60.0), None, Some(100.0), Some(85.0), Some(88.0)],
        "BPSYSD" => [None::<f64>, None, None, None, None, Some(150.0), None, None],
        "BPDIASD" => [None::<f64>, None, None, None, None, Some(95.0), None, None],
        "YEAR" => [2016i64, 2016, 2016, 2015, 2015, 2015, 2016, 2015],
        "FEMALE" => [1i64, 0, 1, 0, 1, 0, 1, 0],
        "REGION" => ["South", "West", "South", "Midwest", "West", "West", "Midwest", "South"],
        "DIED" => [1i64, 0, 0, 0, 1, 1, 0, 0],
        "ED_LOS" => [Some(3.0), Some(2.0), Some(4.0), Some(1.0), None, Some(5.0), Some(2.5), Some(6.5)],
        "ALL_ONE" => [1i64, 1, 1, 1, 1, 1, 1, 1],
        "TRIAGE" => [1i64, 2, 0, 1, 1, 0, 2, 1],
    ]
    .unwrap()
}

/// Unwrap the core error behind a survey-polars error
pub fn core_error(err: &survey_polars::Error) -> &survey_core::Error {
    err.core_error()
        .unwrap_or_else(|| panic!("expected a core error, got {err}"))
}
