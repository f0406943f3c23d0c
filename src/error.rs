//! Error types for loading, aggregating and charting benchmark records.

use crate::models::TrialRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, VizError>;

/// Every failure is fatal for the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum VizError {
    /// Input file missing or unreadable.
    #[error("Cannot read input file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank line is not a valid record object.
    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A parsed record violates a record invariant.
    #[error("{record} is an invalid record: {reason}")]
    InvalidRecord {
        record: TrialRecord,
        reason: &'static str,
    },

    /// No records survived parsing.
    #[error("No trial records found; statistics over an empty set are undefined")]
    EmptyDataset,

    /// Chart backend failure.
    #[error("Chart rendering failed: {0}")]
    Render(String),

    /// The chart image could not be staged or moved into place.
    #[error("Cannot write chart {}: {source}", .path.display())]
    ChartWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VizError {
    /// Create a malformed-record error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create a render error from any backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_message_names_record() {
        let err = VizError::InvalidRecord {
            record: TrialRecord::new(0, 10, true, 1.5),
            reason: "variable count is zero",
        };
        let msg = err.to_string();
        assert!(msg.contains("n=0"));
        assert!(msg.contains("variable count is zero"));
    }

    #[test]
    fn test_file_access_message_names_path() {
        let err = VizError::FileAccess {
            path: PathBuf::from("missing.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.jsonl"));
    }

    #[test]
    fn test_chart_write_message_names_path() {
        let err = VizError::ChartWrite {
            path: PathBuf::from("charts/phase.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("charts/phase.png"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_malformed_carries_line() {
        let err = VizError::malformed(7, "expected value");
        assert!(err.to_string().contains("line 7"));
    }
}
