//! Row-level validation error record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row index marking a column-level violation with no specific row.
pub const NO_ROW: i64 = -1;

/// One rule violation produced by the validator.
///
/// `value` is coerced to a native JSON scalar (numbers stay numbers, dates
/// become ISO strings) before serialization. The impacted key names the
/// table's first column and its value on the violating row, for
/// traceability back to the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub column: String,
    /// Violating row index, or [`NO_ROW`] for column-level violations.
    pub row: i64,
    pub message: String,
    pub value: Value,
    #[serde(rename = "Impacted_Key")]
    pub impacted_key: Option<String>,
    #[serde(rename = "Impacted_key_Value")]
    pub impacted_key_value: Option<Value>,
}

impl ValidationError {
    /// A violation tied to a specific cell.
    pub fn at_row(
        column: impl Into<String>,
        row: usize,
        message: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            column: column.into(),
            row: row as i64,
            message: message.into(),
            value,
            impacted_key: None,
            impacted_key_value: None,
        }
    }

    /// A violation with column scope only.
    pub fn column_level(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            row: NO_ROW,
            message: message.into(),
            value: Value::Null,
            impacted_key: None,
            impacted_key_value: None,
        }
    }

    /// Attach the impacted primary-key column and its value.
    #[must_use]
    pub fn with_impacted_key(mut self, key: impl Into<String>, value: Value) -> Self {
        self.impacted_key = Some(key.into());
        self.impacted_key_value = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_field_names() {
        let err = ValidationError::at_row("zip", 4, "Numeric Only", json!("12a"))
            .with_impacted_key("id", json!(105));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["column"], "zip");
        assert_eq!(value["row"], 4);
        assert_eq!(value["value"], "12a");
        assert_eq!(value["Impacted_Key"], "id");
        assert_eq!(value["Impacted_key_Value"], 105);
    }

    #[test]
    fn test_column_level_row_marker() {
        let err = ValidationError::column_level("ssn", "missing column");
        assert_eq!(err.row, NO_ROW);
        assert_eq!(err.value, Value::Null);
    }
}
