//! Error types for survey-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Survey core error: {0}")]
    Core(#[from] survey_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch in {column}: expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    #[error("{estimator} failed for {variable}: {source}")]
    Estimator {
        variable: String,
        estimator: &'static str,
        #[source]
        source: survey_core::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a core error with the variable and estimator that produced it
    pub fn estimator<'a>(
        variable: &'a str,
        estimator: &'static str,
    ) -> impl FnOnce(survey_core::Error) -> Self + 'a {
        move |source| Self::Estimator {
            variable: variable.to_string(),
            estimator,
            source,
        }
    }

    /// The underlying core error, if any
    pub fn core_error(&self) -> Option<&survey_core::Error> {
        match self {
            Self::Core(e) | Self::Estimator { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
