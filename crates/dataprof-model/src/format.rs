//! Shared output formatting.
//!
//! Every rounded numeric value in the JSON artifacts goes through [`round3`],
//! and every artifact is passed through [`blank_nulls`] before it is written
//! so that absent values emit as empty strings rather than `null` literals.

use serde_json::Value;

/// Format a number with fixed 3-decimal rounding.
///
/// # Examples
///
/// ```
/// use dataprof_model::round3;
///
/// assert_eq!(round3(1.0), "1.000");
/// assert_eq!(round3(2.71828), "2.718");
/// assert_eq!(round3(-0.0005), "-0.001");
/// ```
pub fn round3(value: f64) -> String {
    format!("{value:.3}")
}

/// [`round3`] lifted over `Option`, yielding `None` for `None` and NaN.
pub fn round3_opt(value: Option<f64>) -> Option<String> {
    value.filter(|v| !v.is_nan()).map(round3)
}

/// Replace every JSON `null` with an empty string, recursively.
///
/// Artifacts never contain `null`/`None` literals in their final form; this
/// is applied once at the serialization boundary.
pub fn blank_nulls(value: &mut Value) {
    match value {
        Value::Null => *value = Value::String(String::new()),
        Value::Array(items) => {
            for item in items {
                blank_nulls(item);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                blank_nulls(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.0), "0.000");
        assert_eq!(round3(12.34567), "12.346");
        assert_eq!(round3(-1.5), "-1.500");
    }

    #[test]
    fn test_round3_opt() {
        assert_eq!(round3_opt(Some(1.0)), Some("1.000".to_string()));
        assert_eq!(round3_opt(None), None);
        assert_eq!(round3_opt(Some(f64::NAN)), None);
    }

    #[test]
    fn test_blank_nulls_nested() {
        let mut value = json!({
            "a": null,
            "b": [null, 1, "x"],
            "c": {"d": null, "e": 2.5}
        });
        blank_nulls(&mut value);
        assert_eq!(
            value,
            json!({
                "a": "",
                "b": ["", 1, "x"],
                "c": {"d": "", "e": 2.5}
            })
        );
    }

    #[test]
    fn test_blank_nulls_leaves_scalars() {
        let mut value = json!({"n": 3, "s": "text", "f": false});
        blank_nulls(&mut value);
        assert_eq!(value, json!({"n": 3, "s": "text", "f": false}));
    }
}
