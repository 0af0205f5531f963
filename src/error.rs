//! Error type for the overview pipeline.
//!
//! Every failure is fatal for the page load: the handler renders the error
//! page instead of a partial table.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverviewError {
    #[error("Could not open {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workbook error in {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("Column '{column}' missing in {source_name}")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid date in row {row}, column '{column}': {value:?}")]
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row} ({organization}) has no trial_start_date")]
    MissingStartDate { row: usize, organization: String },
}

pub type OverviewResult<T> = Result<T, OverviewError>;
