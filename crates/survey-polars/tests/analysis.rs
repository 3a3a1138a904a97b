//! End-to-end analysis runs

mod common;

use approx::assert_relative_eq;
use common::{visits, CUTOFF};
use std::fs;
use survey_polars::*;

fn config() -> AnalysisConfig {
    AnalysisConfig {
        cutoffs: vec![Cutoff::new(180.0, 110.0), CUTOFF],
        categorical_queries: vec![
            CategoricalQuery::binomial("FEMALE"),
            CategoricalQuery::multinomial("REGION"),
        ],
        outcome_queries: vec![
            OutcomeQuery::categorical("DIED"),
            OutcomeQuery::numeric("ED_LOS"),
        ],
        ..AnalysisConfig::default()
    }
}

fn nobody_exposed_config() -> AnalysisConfig {
    AnalysisConfig {
        cutoffs: vec![Cutoff::new(200.0, 120.0)],
        ..config()
    }
}

#[test]
fn test_report_structure() {
    let config = AnalysisConfig {
        cutoffs: vec![Cutoff::new(150.0, 99.0), CUTOFF],
        ..config()
    };
    let report = run_analysis(&visits(), &config).unwrap();

    assert_eq!(report.cutoffs.len(), 2);
    assert_eq!(report.cutoffs[0].cutoff, Cutoff::new(150.0, 99.0));
    assert_eq!(report.cutoffs[1].cutoff, CUTOFF);

    let at_cutoff = report.cutoff(CUTOFF).unwrap();
    // TOTALS, FEMALE and three regions
    assert_eq!(at_cutoff.baseline.len(), 5);
    assert_eq!(at_cutoff.outcomes.len(), 3);

    // 2015: 200k exposed of 850k; 2016: 250k of 650k
    let by_year = &at_cutoff.exposure_by_year;
    assert_eq!(by_year.len(), 2);
    assert_eq!(by_year[0].year, 2015);
    assert_relative_eq!(by_year[0].estimate, 200.0 / 850.0, epsilon = 1e-12);
    assert_relative_eq!(by_year[1].estimate, 250.0 / 650.0, epsilon = 1e-12);

    assert_eq!(report.systolic_bins.len(), 2);
    let died = &report.systolic_bins[0];
    assert_eq!(died.outcome, "DIED");
    let values = died.histogram.values();
    assert_eq!(values[2], Some(0.0));
    assert_relative_eq!(values[4].unwrap(), 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(values[0], None);

    // systolic and diastolic for both years
    assert_eq!(report.pressure_trends.len(), 4);
    assert_eq!(report.pressure_trends[0].measure, "BPSYS");
    assert_eq!(report.pressure_trends[0].year, 2015);
}

#[test]
fn test_trait_matches_free_function() {
    let config = AnalysisConfig {
        cutoffs: vec![CUTOFF],
        ..config()
    };
    let df = visits();
    assert_eq!(
        df.survey_analysis(&config).unwrap(),
        run_analysis(&df, &config).unwrap()
    );
}

#[test]
fn test_cutoff_without_exposed_visits_fails() {
    let err = run_analysis(&visits(), &nobody_exposed_config()).unwrap_err();
    assert!(matches!(
        err.core_error(),
        Some(survey_core::Error::InvalidDomain(_))
    ));
}

#[test]
fn test_write_csv_dir() {
    let config = AnalysisConfig {
        cutoffs: vec![CUTOFF],
        ..config()
    };
    let report = run_analysis(&visits(), &config).unwrap();

    let base = std::env::temp_dir().join(format!("survey-polars-report-{}", std::process::id()));
    let _ = fs::remove_dir_all(&base);
    report.write_csv_dir(&base).unwrap();

    let cutoff_dir = base.join("stats_HTN_140_90");
    let baseline = fs::read_to_string(cutoff_dir.join(BASELINE_FILE)).unwrap();
    let mut lines = baseline.lines();
    assert_eq!(
        lines.next(),
        Some("key,n_total,n_not_exposed,n_exposed,proportion_total,proportion_not_exposed,proportion_exposed,p_value")
    );
    assert!(lines.next().unwrap().starts_with("TOTALS,1.4,0.95,0.45,1.0,"));
    assert_eq!(baseline.lines().count(), 6);

    let outcome = fs::read_to_string(cutoff_dir.join(OUTCOME_FILE)).unwrap();
    assert!(outcome.contains("TOTAL,-,0.95,0.45,-,-,-"));
    assert!(cutoff_dir.join(EXPOSURE_BY_YEAR_FILE).exists());

    let bins = fs::read_to_string(base.join(SYSTOLIC_BINS_FILE)).unwrap();
    // header plus nine bins per outcome
    assert_eq!(bins.lines().count(), 1 + 2 * 9);
    assert!(bins.contains("DIED,categorical,\"(140, 160]\",3,"));
    assert!(base.join(PRESSURE_TRENDS_FILE).exists());

    fs::remove_dir_all(&base).unwrap();
}

#[test]
fn test_config_file_drives_analysis() {
    let path = std::env::temp_dir().join(format!("survey-polars-config-{}.json", std::process::id()));
    let config = AnalysisConfig {
        cutoffs: vec![CUTOFF],
        mean_display: MeanDisplay::Weighted,
        ..config()
    };
    fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = AnalysisConfig::from_path(&path).unwrap();
    assert_eq!(loaded, config);
    let report = run_analysis(&visits(), &loaded).unwrap();
    assert_eq!(report.cutoffs.len(), 1);

    fs::remove_file(&path).unwrap();
}
