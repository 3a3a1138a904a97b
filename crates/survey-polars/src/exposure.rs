//! Threshold-based exposure classification

use polars::prelude::DataFrame;
use survey_core::Error as CoreError;

use crate::config::{ColumnConfig, Cutoff};
use crate::dataset::SurveyFrame;
use crate::Result;

/// Elevated blood pressure rule over triage measurements
///
/// A visit is exposed when its triage systolic pressure is above the
/// systolic threshold or its triage diastolic pressure is above the
/// diastolic threshold. A missing measurement never satisfies its
/// comparison. The post-triage measurements are carried along but do not
/// enter the rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureDefinition {
    cutoff: Cutoff,
    systolic: Vec<Option<f64>>,
    diastolic: Vec<Option<f64>>,
    systolic_repeat: Vec<Option<f64>>,
    diastolic_repeat: Vec<Option<f64>>,
}

impl ExposureDefinition {
    /// Build from in-memory measurement columns of equal length
    pub fn from_vectors(
        cutoff: Cutoff,
        systolic: Vec<Option<f64>>,
        diastolic: Vec<Option<f64>>,
        systolic_repeat: Vec<Option<f64>>,
        diastolic_repeat: Vec<Option<f64>>,
    ) -> Result<Self> {
        let n = systolic.len();
        for (len, context) in [
            (diastolic.len(), "diastolic pressure"),
            (systolic_repeat.len(), "repeat systolic pressure"),
            (diastolic_repeat.len(), "repeat diastolic pressure"),
        ] {
            if len != n {
                return Err(CoreError::size_mismatch(len, n, context).into());
            }
        }

        Ok(Self {
            cutoff,
            systolic,
            diastolic,
            systolic_repeat,
            diastolic_repeat,
        })
    }

    /// Read the four measurement columns from a frame
    pub fn from_frame(frame: &DataFrame, cutoff: Cutoff, columns: &ColumnConfig) -> Result<Self> {
        let survey = SurveyFrame::new(frame, &columns.weight)?;
        Self::from_survey_frame(&survey, cutoff, columns)
    }

    pub(crate) fn from_survey_frame(
        frame: &SurveyFrame<'_>,
        cutoff: Cutoff,
        columns: &ColumnConfig,
    ) -> Result<Self> {
        Self::from_vectors(
            cutoff,
            frame.continuous(&columns.systolic)?,
            frame.continuous(&columns.diastolic)?,
            frame.continuous(&columns.systolic_repeat)?,
            frame.continuous(&columns.diastolic_repeat)?,
        )
    }

    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    /// Number of visits
    pub fn len(&self) -> usize {
        self.systolic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systolic.is_empty()
    }

    /// Triage systolic pressure per visit
    pub fn systolic(&self) -> &[Option<f64>] {
        &self.systolic
    }

    pub fn diastolic(&self) -> &[Option<f64>] {
        &self.diastolic
    }

    pub fn systolic_repeat(&self) -> &[Option<f64>] {
        &self.systolic_repeat
    }

    pub fn diastolic_repeat(&self) -> &[Option<f64>] {
        &self.diastolic_repeat
    }

    /// One exposure flag per visit
    pub fn classify(&self) -> Vec<bool> {
        let above = |value: Option<f64>, threshold: f64| value.is_some_and(|v| v > threshold);
        self.systolic
            .iter()
            .zip(&self.diastolic)
            .map(|(&sbp, &dbp)| {
                above(sbp, self.cutoff.systolic) || above(dbp, self.cutoff.diastolic)
            })
            .collect()
    }

    /// Visits missing either triage measurement
    pub fn missing_measurements(&self) -> usize {
        self.systolic
            .iter()
            .zip(&self.diastolic)
            .filter(|(sbp, dbp)| sbp.is_none() || dbp.is_none())
            .count()
    }
}
