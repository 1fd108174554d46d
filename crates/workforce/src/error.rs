//! Error types for the ingestion pipeline and metric computations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for workforce operations.
pub type Result<T> = std::result::Result<T, WorkforceError>;

/// Errors that can occur while building or querying the dataset.
#[derive(Debug, Error)]
pub enum WorkforceError {
    /// Input spreadsheet does not exist. Fatal at startup.
    #[error("Missing input spreadsheet: {0}")]
    MissingInput(PathBuf),

    /// Lookup resource does not exist. Fatal at startup: the pipeline
    /// cannot proceed with partial lookup data.
    #[error("Missing lookup resource: {0}")]
    MissingResource(PathBuf),

    /// Lookup resource exists but a line could not be parsed.
    #[error("Malformed lookup resource {file} at line {line}: {reason}")]
    ResourceFormat {
        /// Resource file path
        file: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Spreadsheet with no sheets or no header row
    #[error("Empty spreadsheet: {0}")]
    EmptySpreadsheet(PathBuf),

    /// Missing required column in input data
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Calendar arithmetic produced an unrepresentable date
    #[error("Invalid period: year {year}, month {month}")]
    InvalidPeriod {
        /// Requested year
        year: i32,
        /// Requested month (1-12)
        month: u32,
    },

    /// Spreadsheet reader error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Correction table deserialization error
    #[error("Correction table error: {0}")]
    Corrections(#[from] serde_json::Error),

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}
