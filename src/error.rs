//! Error taxonomy for the pipeline. Every variant aborts the current operation;
//! nothing here is retried or recovered from.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source file missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header record could not be decoded (bad UTF-8, unbalanced quotes).
    #[error("malformed header in {}: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed delimited content (too many fields, bad UTF-8, ...).
    #[error("malformed delimited data in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("required column `{column}` is missing")]
    MissingColumn { column: String },

    /// A value that must be numeric/temporal could not be interpreted.
    #[error("row {row}: column `{column}` has uninterpretable value {value:?}")]
    Data {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataframe operation failed: {0}")]
    Frame(#[from] PolarsError),

    #[error("relational store error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn missing_column(column: &str) -> Self {
        Self::MissingColumn { column: column.to_string() }
    }
}
