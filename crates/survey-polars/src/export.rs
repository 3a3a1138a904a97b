//! CSV and DataFrame export of the comparison tables

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::categorical_table::{CategoricalComparisonTable, CategoricalRow};
use crate::outcome_table::{OutcomeComparisonTable, OutcomeRow};
use crate::Result;

/// Serialize `rows` as CSV with a header row
pub fn write_rows<W: Write, R: Serialize>(writer: W, rows: &[R]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `rows` to the CSV file at `path`
pub(crate) fn write_rows_to_path<R: Serialize>(path: &Path, rows: &[R]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_rows(BufWriter::new(File::create(path)?), rows)?;
    debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

impl CategoricalComparisonTable {
    /// Serialize the rows as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_rows(writer, self.rows())
    }

    /// The table as a `DataFrame` with one row per table row
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        let field = |f: fn(&CategoricalRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();
        let p_values: Vec<Option<f64>> = rows.iter().map(|r| r.p_value).collect();

        Ok(DataFrame::new(vec![
            Series::new("key".into(), keys).into(),
            Series::new("n_total".into(), field(|r| r.n_total)).into(),
            Series::new("n_not_exposed".into(), field(|r| r.n_not_exposed)).into(),
            Series::new("n_exposed".into(), field(|r| r.n_exposed)).into(),
            Series::new("proportion_total".into(), field(|r| r.proportion_total)).into(),
            Series::new(
                "proportion_not_exposed".into(),
                field(|r| r.proportion_not_exposed),
            )
            .into(),
            Series::new("proportion_exposed".into(), field(|r| r.proportion_exposed)).into(),
            Series::new("p_value".into(), p_values).into(),
        ])?)
    }
}

impl OutcomeComparisonTable {
    /// Serialize the rows as CSV; absent effects are written as `-`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_rows(writer, self.rows())
    }

    /// The table as a `DataFrame`; absent effects are nulls
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind.as_str()).collect();
        let not_exposed: Vec<&str> = rows.iter().map(|r| r.not_exposed.as_str()).collect();
        let exposed: Vec<&str> = rows.iter().map(|r| r.exposed.as_str()).collect();
        let field = |f: fn(&OutcomeRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();

        Ok(DataFrame::new(vec![
            Series::new("key".into(), keys).into(),
            Series::new("kind".into(), kinds).into(),
            Series::new("not_exposed".into(), not_exposed).into(),
            Series::new("exposed".into(), exposed).into(),
            Series::new("effect".into(), field(|r| r.effect)).into(),
            Series::new("lower".into(), field(|r| r.lower)).into(),
            Series::new("upper".into(), field(|r| r.upper)).into(),
        ])?)
    }
}
