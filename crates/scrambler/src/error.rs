//! Error types for scrambler
//!
//! Every failure of the loader or the writer maps onto exactly one variant,
//! so callers can react to the kind of failure without inspecting messages.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading, grouping or writing words
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened
    #[error("Source not found: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested sheet is not in the workbook
    #[error("Sheet '{sheet}' not found in {} (sheets: {})", .path.display(), .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    /// No header in the sheet matches the requested column
    #[error("Column '{column}' not found (columns: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Options that can never produce a result, such as a group size of zero
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input file exists but cannot be decoded
    #[error("Malformed source {}: {message}", .path.display())]
    MalformedSource { path: PathBuf, message: String },

    /// The file extension names no supported format
    #[error("Unsupported file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The output file could not be produced
    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn malformed<P: Into<PathBuf>, E: std::fmt::Display>(path: P, err: E) -> Self {
        Error::MalformedSource {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write<P: Into<PathBuf>, E: std::fmt::Display>(path: P, err: E) -> Self {
        Error::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
