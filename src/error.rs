//! Report error types.
//!
//! The data-availability variants are absorbed by the presenter into the
//! demo path; only export, archive and config failures reach the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Report directory not found: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("Report directory could not be read: {}: {message}", .path.display())]
    DirectoryUnreadable { path: PathBuf, message: String },

    #[error("No files matching {pattern} in {}", .directory.display())]
    NoMatchingFiles { directory: PathBuf, pattern: String },

    #[error("Could not parse report {}: {message}", .path.display())]
    FileParseError { path: PathBuf, message: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Archive failed for {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ReportError {
    /// True for the failures that mean "no real data", which the
    /// presenter answers with the demo dataset.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            ReportError::DirectoryMissing(_)
                | ReportError::DirectoryUnreadable { .. }
                | ReportError::NoMatchingFiles { .. }
                | ReportError::FileParseError { .. }
        )
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Export(err.to_string())
    }
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
