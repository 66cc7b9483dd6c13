//! Store error types
//!
//! Only root-level failures surface as errors. A file whose metadata can't
//! be read is logged and skipped by the scanner and never reaches this type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the event store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Configured root does not exist
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Configured root exists but is not a directory
    #[error("Root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Configured root could not be inspected
    #[error("Cannot read root directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No root directories configured
    #[error("No root directories configured")]
    NoRoots,

    /// Background scan task failed to complete
    #[error("Scan task failed: {0}")]
    Task(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::RootNotFound(PathBuf::from("/cases/missing"));
        assert_eq!(err.to_string(), "Root directory not found: /cases/missing");

        let err = StoreError::NoRoots;
        assert_eq!(err.to_string(), "No root directories configured");
    }

    #[test]
    fn test_unreadable_keeps_source() {
        use std::error::Error as _;

        let err = StoreError::RootUnreadable {
            path: PathBuf::from("/root/secret"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/root/secret"));
        assert!(err.source().is_some());
    }
}
