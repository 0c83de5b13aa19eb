//! Dataset-level summary and frequency artifacts.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Value, json};

use dataprof_model::{DatasetRef, any_to_string, is_missing_value};

/// Cap on per-column frequency entries in `frequency_stats.json`.
const FREQUENCY_CAP: usize = 10;

/// Build the `summary.json` payload for a loaded table.
pub fn build_summary(df: &DataFrame, dataset: &DatasetRef) -> Value {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    json!({
        "name": dataset.title,
        "file_name": dataset.file_name,
        "rows": df.height(),
        "columns": df.width(),
        "column_names": columns,
    })
}

/// Build the `frequency_stats.json` payload: per column, the most frequent
/// non-missing values and their counts, capped at [`FREQUENCY_CAP`].
pub fn build_frequency_stats(df: &DataFrame) -> Value {
    let mut out = serde_json::Map::new();
    for column in df.get_columns() {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for idx in 0..column.len() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if is_missing_value(&value) {
                continue;
            }
            *counts.entry(any_to_string(value)).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(FREQUENCY_CAP);

        let mut entry = serde_json::Map::new();
        for (value, count) in ranked {
            entry.insert(value, Value::from(count));
        }
        out.insert(column.name().to_string(), Value::Object(entry));
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn test_summary_shape() {
        let frame = df! { "a" => &[1i64, 2], "b" => &["x", "y"] }.unwrap();
        let ds = DatasetRef::new("demo.csv");
        let summary = build_summary(&frame, &ds);
        assert_eq!(summary["name"], "demo");
        assert_eq!(summary["rows"], 2);
        assert_eq!(summary["columns"], 2);
        assert_eq!(summary["column_names"][1], "b");
    }

    #[test]
    fn test_frequency_counts() {
        let frame = df! { "c" => &["x", "x", "y", ""] }.unwrap();
        let stats = build_frequency_stats(&frame);
        assert_eq!(stats["c"]["x"], 2);
        assert_eq!(stats["c"]["y"], 1);
        // Blank cells are excluded.
        assert!(stats["c"].get("").is_none());
    }
}
