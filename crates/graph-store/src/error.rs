//! Error types for the graph-store crate.
//!
//! Every failure while reading a MovieLens directory maps to one
//! `StoreError` variant, so callers can tell a missing dataset apart from a
//! malformed one.

use thiserror::Error;

/// Errors that can occur while loading and validating the rating graph
#[derive(Error, Debug)]
pub enum StoreError {
    /// Neither a `.csv` nor a `.dat` dataset was found
    #[error("No MovieLens dataset found in {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The csv reader rejected a record
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Line in data file couldn't be parsed
    ///
    /// Carries the file name and 1-based line number for diagnostics
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
