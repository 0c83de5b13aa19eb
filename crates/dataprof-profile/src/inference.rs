//! Column type inference.
//!
//! Physical type comes from the column's native dtype, with one refinement:
//! integer columns whose non-missing values are all 0 or 1 are Boolean.
//! Variable type follows a fixed precedence over the physical type and the
//! column's uniqueness ratio.

use polars::prelude::{AnyValue, Column, DataType};

use dataprof_model::limits::UNIQUENESS_CUTOFF;
use dataprof_model::{PhysicalType, VariableType, any_to_string, is_missing_value};

/// Inferred classification of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `None` when the dtype has no scalar interpretation.
    pub physical: Option<PhysicalType>,
    pub variable: VariableType,
}

/// Classify a column's physical and variable type.
pub fn classify_column(column: &Column) -> Classification {
    let physical = infer_physical(column);
    let variable = match physical {
        Some(PhysicalType::Boolean) => VariableType::Binary,
        Some(PhysicalType::String | PhysicalType::Date) => VariableType::Categorical,
        Some(PhysicalType::Integer | PhysicalType::Float) => {
            if uniqueness_ratio(column) < UNIQUENESS_CUTOFF {
                VariableType::Categorical
            } else {
                VariableType::Continuous
            }
        }
        None => VariableType::Unknown,
    };
    Classification { physical, variable }
}

/// Ratio of distinct non-missing values to non-missing count.
///
/// Zero for an all-missing column.
pub fn uniqueness_ratio(column: &Column) -> f64 {
    let mut distinct = std::collections::BTreeSet::new();
    let mut non_missing = 0usize;
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_value(&value) {
            continue;
        }
        non_missing += 1;
        distinct.insert(any_to_string(value));
    }
    if non_missing == 0 {
        0.0
    } else {
        distinct.len() as f64 / non_missing as f64
    }
}

fn infer_physical(column: &Column) -> Option<PhysicalType> {
    match column.dtype() {
        DataType::Boolean => Some(PhysicalType::Boolean),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            if is_zero_one(column) {
                Some(PhysicalType::Boolean)
            } else {
                Some(PhysicalType::Integer)
            }
        }
        DataType::Float32 | DataType::Float64 => Some(PhysicalType::Float),
        DataType::Date | DataType::Datetime(_, _) => Some(PhysicalType::Date),
        DataType::String => Some(PhysicalType::String),
        DataType::Null => None,
        _ => None,
    }
}

/// True when every non-missing value is exactly 0 or 1 and at least one
/// value is present.
fn is_zero_one(column: &Column) -> bool {
    let mut seen = false;
    for idx in 0..column.len() {
        match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => {}
            value => match dataprof_model::any_to_f64(value) {
                Some(v) if v == 0.0 || v == 1.0 => seen = true,
                _ => return false,
            },
        }
    }
    seen
}
