//! Error types for loading and querying HR data.

use thiserror::Error;

/// Result type for HR metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while loading or querying the roster.
///
/// Every variant except [`MetricsError::NotFound`] can be raised by
/// [`Dataset::load`](crate::Dataset::load) and is fatal: no partial dataset is
/// ever produced.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The source file could not be opened or read
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Missing required column in input data
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A required cell is blank
    #[error("Missing value in column {column} at row {row}")]
    MissingValue {
        /// Column name
        column: String,
        /// 1-based data row
        row: usize,
    },

    /// A date cell could not be parsed with any configured format
    #[error("Invalid date {value:?} in column {column} at row {row}")]
    InvalidDate {
        /// Column name
        column: String,
        /// 1-based data row
        row: usize,
        /// Raw cell text
        value: String,
    },

    /// Last working date precedes hiring date
    #[error("Invalid date range at row {row}: hired {start} but left {end}")]
    InvalidDateRange {
        /// 1-based data row
        row: usize,
        /// Hiring date
        start: String,
        /// Last working date
        end: String,
    },

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Breakdown not found in registry
    #[error("Breakdown not found: {0}")]
    NotFound(String),
}
