//! Error types for rule validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or evaluating a validation schema, or
/// while talking to the rule store.
///
/// Schema failures are swallowed at the run level: the run transitions to
/// its Failed state and the caller observes an empty error artifact.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Rule name is neither a built-in nor a stored regex.
    #[error("unknown rule '{name}' for column '{column}'")]
    UnknownRule { name: String, column: String },

    /// Stored regex failed to compile.
    #[error("invalid regex for rule '{name}': {message}")]
    InvalidRegex { name: String, message: String },

    /// Stored regex entry is malformed.
    #[error("malformed regex entry for rule '{name}'")]
    MalformedRegexEntry { name: String },

    /// Rule store file I/O failure.
    #[error("failed to {operation} rule store {path}: {source}")]
    StoreIo {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule store contents are not valid JSON.
    #[error("rule store {path} is not valid JSON: {source}")]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// DataFrame column access failed mid-run.
    #[error("column '{column}' disappeared during validation")]
    ColumnAccess { column: String },
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidateError::UnknownRule {
            name: "Phone Format".to_string(),
            column: "phone1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown rule 'Phone Format' for column 'phone1'"
        );
    }
}
