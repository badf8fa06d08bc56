//! Data store error types
//!
//! Defines all errors that can occur while loading the dataset or
//! resolving catalog entries.

use thiserror::Error;

/// Errors that can occur while loading the base table
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected a record
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date cell did not match any accepted format
    #[error("Line {line}: invalid date '{value}'")]
    InvalidDate { line: u64, value: String },

    /// A non-empty metric cell is not a number
    #[error("Line {line}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => return LoadError::Io(io),
                other => return LoadError::Csv(format!("{:?}", other)),
            }
        }
        LoadError::Csv(err.to_string())
    }
}

/// Result type alias for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// A metric key outside the fixed catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric: {0}")]
pub struct UnknownMetric(pub String);
