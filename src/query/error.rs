//! Query error types
//!
//! Only malformed request text is an error. A well-formed but empty or
//! inverted date range, or an unknown timestamp kind, produces an empty
//! result instead.

use thiserror::Error;

/// Errors that can occur while interpreting query parameters
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Date text could not be parsed
    #[error("Cannot parse date: {0}")]
    InvalidDate(String),

    /// Relative date expression was malformed
    #[error("Invalid relative date: {0}")]
    InvalidRelativeDate(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
