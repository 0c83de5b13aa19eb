//! Error types for table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tabular file.
///
/// Load failures are reported to the caller as a message; they never abort
/// the process, only the profiling request for the affected dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Data file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the file contents.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// File parsed but produced no rows or columns.
    #[error("table is empty: {path}")]
    EmptyTable { path: PathBuf },

    /// Extension is not one of csv/tsv/xls/xlsx/xlsm/xlsb.
    #[error("unsupported file format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

impl LoadError {
    /// Parse error with the underlying message, for any source error type.
    pub fn parse(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("/data/missing.csv"),
        };
        assert_eq!(err.to_string(), "data file not found: /data/missing.csv");
    }

    #[test]
    fn test_parse_helper_keeps_message() {
        let err = LoadError::parse(std::path::Path::new("x.csv"), "bad delimiter");
        assert!(err.to_string().contains("bad delimiter"));
    }
}
