//! Polars `AnyValue` helpers used by all cell-walking code.

use polars::prelude::AnyValue;
use serde_json::Value;

use crate::limits::MISSING_MARKER;

/// Converts a Polars `AnyValue` to its `String` representation.
///
/// Returns an empty string for `Null`; numeric types format without
/// unnecessary trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or
/// null values. Strings are parsed.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Coerces an `AnyValue` into a native JSON scalar.
///
/// Integers and floats become JSON numbers, booleans stay booleans,
/// everything else (dates included, which polars renders as ISO strings)
/// becomes a JSON string; `Null` stays `null`.
pub fn any_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => Value::from(f64::from(v)),
        AnyValue::Float64(v) => Value::from(v),
        AnyValue::Boolean(b) => Value::from(b),
        AnyValue::String(s) => Value::from(s),
        AnyValue::StringOwned(s) => Value::from(s.to_string()),
        other => Value::from(other.to_string()),
    }
}

/// True when a cell counts as missing: null, blank/whitespace-only text,
/// or the explicit missing marker substituted by the loader.
pub fn is_missing_value(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty() || *s == MISSING_MARKER,
        AnyValue::StringOwned(s) => {
            let s = s.as_str();
            s.trim().is_empty() || s == MISSING_MARKER
        }
        _ => false,
    }
}

/// Formats a floating-point number without trailing fractional zeros.
///
/// Integral values render without a decimal point and must keep their own
/// zeros, so trimming only applies when a fractional part is present.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Float64(1.50)), "1.5");
        assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int64(7)), Some(7.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("abc")), None);
    }

    #[test]
    fn test_any_to_json_scalars() {
        assert_eq!(any_to_json(AnyValue::Int32(3)), serde_json::json!(3));
        assert_eq!(any_to_json(AnyValue::Float64(1.5)), serde_json::json!(1.5));
        assert_eq!(any_to_json(AnyValue::Boolean(true)), serde_json::json!(true));
        assert_eq!(any_to_json(AnyValue::Null), serde_json::Value::Null);
    }

    #[test]
    fn test_format_numeric_integral_floats() {
        // Integral floats render with no decimal point, so nothing may be
        // trimmed from them.
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(2500.0), "2500");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-40.0), "-40");
    }

    #[test]
    fn test_format_numeric_fractional() {
        assert_eq!(format_numeric(2.5), "2.5");
        assert_eq!(format_numeric(0.001), "0.001");
        assert_eq!(format_numeric(-1.25), "-1.25");
    }

    #[test]
    fn test_is_missing_value() {
        assert!(is_missing_value(&AnyValue::Null));
        assert!(is_missing_value(&AnyValue::String("  ")));
        assert!(is_missing_value(&AnyValue::String(MISSING_MARKER)));
        assert!(!is_missing_value(&AnyValue::String("x")));
        assert!(!is_missing_value(&AnyValue::Int32(0)));
    }
}
