//! Configuration types for the exposure comparison analysis
//!
//! Everything the analysis needs is carried by [`AnalysisConfig`] and passed
//! explicitly; there is no process-wide state. The configuration round-trips
//! through JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use survey_histogram::BinEdges;

use crate::Result;

/// Kind of a baseline characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoricalKind {
    /// 0/1 indicator column
    Binomial,
    /// Column with a finite label set, reported per label
    Multinomial,
}

impl CategoricalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binomial => "binomial",
            Self::Multinomial => "multinomial",
        }
    }
}

impl FromStr for CategoricalKind {
    type Err = survey_core::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "binomial" => Ok(Self::Binomial),
            "multinomial" => Ok(Self::Multinomial),
            other => Err(survey_core::Error::UnsupportedQueryKind(other.to_string())),
        }
    }
}

/// Kind of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutcomeKind {
    /// 0/1 outcome compared by relative risk
    Categorical,
    /// Continuous outcome compared by mean difference
    Numeric,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Numeric => "numeric",
        }
    }
}

impl FromStr for OutcomeKind {
    type Err = survey_core::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "categorical" => Ok(Self::Categorical),
            "numeric" => Ok(Self::Numeric),
            other => Err(survey_core::Error::UnsupportedQueryKind(other.to_string())),
        }
    }
}

macro_rules! string_conversions {
    ($kind:ty) => {
        impl TryFrom<String> for $kind {
            type Error = survey_core::Error;

            fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$kind> for String {
            fn from(kind: $kind) -> Self {
                kind.as_str().to_string()
            }
        }

        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_conversions!(CategoricalKind);
string_conversions!(OutcomeKind);

/// A baseline characteristic to compare between exposure groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalQuery {
    pub variable: String,
    pub kind: CategoricalKind,
}

impl CategoricalQuery {
    pub fn new(variable: &str, kind: CategoricalKind) -> Self {
        Self {
            variable: variable.to_string(),
            kind,
        }
    }

    pub fn binomial(variable: &str) -> Self {
        Self::new(variable, CategoricalKind::Binomial)
    }

    pub fn multinomial(variable: &str) -> Self {
        Self::new(variable, CategoricalKind::Multinomial)
    }
}

/// An outcome to compare between exposure groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeQuery {
    pub outcome: String,
    pub kind: OutcomeKind,
}

impl OutcomeQuery {
    pub fn new(outcome: &str, kind: OutcomeKind) -> Self {
        Self {
            outcome: outcome.to_string(),
            kind,
        }
    }

    pub fn categorical(outcome: &str) -> Self {
        Self::new(outcome, OutcomeKind::Categorical)
    }

    pub fn numeric(outcome: &str) -> Self {
        Self::new(outcome, OutcomeKind::Numeric)
    }
}

/// Blood pressure thresholds in mmHg
///
/// A visit is exposed when systolic pressure is above `systolic` or
/// diastolic pressure is above `diastolic`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoff {
    pub systolic: f64,
    pub diastolic: f64,
}

impl Cutoff {
    pub fn new(systolic: f64, diastolic: f64) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }

    /// Output directory name, e.g. `stats_HTN_180_110`
    pub fn dir_name(&self) -> String {
        format!("stats_HTN_{}_{}", self.systolic, self.diastolic)
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}/{}", self.systolic, self.diastolic)
    }
}

/// Column names of the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Survey weight per visit
    pub weight: String,
    /// Systolic pressure at triage
    pub systolic: String,
    /// Diastolic pressure at triage
    pub diastolic: String,
    /// Systolic pressure taken after triage
    pub systolic_repeat: String,
    /// Diastolic pressure taken after triage
    pub diastolic_repeat: String,
    /// Survey year
    pub year: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            weight: "PATWT".to_string(),
            systolic: "BPSYS".to_string(),
            diastolic: "BPDIAS".to_string(),
            systolic_repeat: "BPSYSD".to_string(),
            diastolic_repeat: "BPDIASD".to_string(),
            year: "YEAR".to_string(),
        }
    }
}

/// How per-group means of numeric outcomes are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeanDisplay {
    /// Plain arithmetic mean of the non-missing values
    #[default]
    Unweighted,
    /// Survey-weighted mean of the non-missing values
    Weighted,
}

/// Full configuration of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub columns: ColumnConfig,
    pub cutoffs: Vec<Cutoff>,
    pub categorical_queries: Vec<CategoricalQuery>,
    pub outcome_queries: Vec<OutcomeQuery>,
    /// Systolic pressure bins for outcome aggregation
    pub bin_edges: BinEdges,
    /// Level of the yearly confidence intervals
    pub confidence_level: f64,
    pub mean_display: MeanDisplay,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        use CategoricalQuery as C;
        use OutcomeQuery as O;

        Self {
            columns: ColumnConfig::default(),
            cutoffs: vec![
                Cutoff::new(180.0, 110.0),
                Cutoff::new(160.0, 100.0),
                Cutoff::new(140.0, 90.0),
                Cutoff::new(120.0, 80.0),
            ],
            categorical_queries: vec![
                C::multinomial("AGE_BIN"),
                C::multinomial("SEX"),
                C::binomial("HX_HTN"),
                C::multinomial("VDAYR"),
                C::multinomial("VTIMER"),
                C::binomial("ANTIHYPERTENSIVE_RX"),
                C::binomial("ANTIHYPERTENSIVE_GIVEN"),
                C::binomial("TYLENOL_GIVEN"),
                C::binomial("NO_TRIAGE_BP"),
                C::binomial("DIED"),
                C::multinomial("PAYTYPER"),
                C::binomial("ADMITHOS"),
                C::multinomial("ARREMS"),
                C::multinomial("RACERETH"),
                C::multinomial("REGION"),
                C::multinomial("IMMEDR"),
                C::binomial("CHEST_PAIN_VISIT"),
                C::binomial("DYSPNEA_VISIT"),
                C::binomial("ABDOMINAL_PAIN_VISIT"),
                C::multinomial("ATTPHYS"),
                C::multinomial("RESINT"),
                C::binomial("MIDLEVEL"),
                C::binomial("XRAY"),
                C::binomial("CATSCAN"),
                C::binomial("MRI"),
                C::binomial("CBC"),
                C::binomial("TROPONIN"),
            ],
            outcome_queries: vec![
                O::categorical("DIED"),
                O::categorical("ADMITHOS"),
                O::categorical("HTN_COMPLICATION"),
                O::categorical("ANTIHYPERTENSIVE_GIVEN"),
                O::categorical("ANTIHYPERTENSIVE_RX"),
                O::categorical("TYLENOL_GIVEN"),
                O::categorical("CBC"),
                O::categorical("TROPONIN"),
                O::categorical("XRAY"),
                O::categorical("CATSCAN"),
                O::numeric("BPSYS"),
                O::numeric("ED_LOS"),
                O::numeric("HOSP_LOS"),
            ],
            bin_edges: BinEdges::systolic(),
            confidence_level: 0.95,
            mean_display: MeanDisplay::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
