//! Column classification enums.
//!
//! A column carries two classifications: a [`PhysicalType`] (storage-level
//! scalar type) and a [`VariableType`] (semantic role for analysis). Both are
//! closed enums so downstream statistics and scoring code can match
//! exhaustively instead of dispatching on type-name strings.

use serde::{Deserialize, Serialize};

/// Storage-level scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalType {
    Integer,
    Float,
    Boolean,
    Date,
    String,
}

impl PhysicalType {
    /// Human-readable label used in Feature records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::String => "String",
        }
    }

    /// True for Integer and Float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Semantic role of a column for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    Binary,
    Categorical,
    Continuous,
    Unknown,
}

impl VariableType {
    /// Human-readable label used in Feature records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Categorical => "Categorical",
            Self::Continuous => "Continuous",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PhysicalType::Integer.label(), "Integer");
        assert_eq!(VariableType::Categorical.label(), "Categorical");
    }

    #[test]
    fn test_is_numeric() {
        assert!(PhysicalType::Integer.is_numeric());
        assert!(PhysicalType::Float.is_numeric());
        assert!(!PhysicalType::Boolean.is_numeric());
        assert!(!PhysicalType::String.is_numeric());
        assert!(!PhysicalType::Date.is_numeric());
    }
}
