//! Bounded table loading with dual-mode missing handling.

use std::path::Path;

use polars::prelude::{DataFrame, DataType, IntoSeries, StringChunked};
use tracing::debug;

use dataprof_model::limits::{MAX_COLUMNS, MAX_ROWS, MISSING_MARKER};

use crate::csv::read_delimited;
use crate::error::{LoadError, Result};
use crate::excel::read_excel;

/// Loading options.
///
/// `filter_missing` controls the dual-mode contract: statistics load with
/// blank cells replaced by the explicit missing marker, PII scoring loads
/// the unfiltered raw strings.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Row cap.
    pub max_rows: usize,
    /// Column cap; excess trailing columns are dropped.
    pub max_columns: usize,
    /// Replace blank/whitespace-only string cells with the missing marker.
    pub filter_missing: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
            filter_missing: true,
        }
    }
}

impl LoadOptions {
    /// Options for PII scoring: raw strings, no missing substitution.
    pub fn raw() -> Self {
        Self {
            filter_missing: false,
            ..Self::default()
        }
    }
}

/// Loads a bounded sample of a tabular file.
///
/// Format is selected by extension: `csv`, `tsv`/`tab`, or one of the Excel
/// extensions handled by calamine.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let mut df = match extension.as_str() {
        "csv" => read_delimited(path, b',', options.max_rows)?,
        "tsv" | "tab" => read_delimited(path, b'\t', options.max_rows)?,
        "xls" | "xlsx" | "xlsm" | "xlsb" => read_excel(path, options.max_rows)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };

    if df.width() > options.max_columns {
        debug!(
            columns = df.width(),
            cap = options.max_columns,
            "dropping columns past the cap"
        );
        let keep: Vec<_> = df.get_column_names_owned()
            .into_iter()
            .take(options.max_columns)
            .collect();
        df = df
            .select(keep)
            .map_err(|e| LoadError::parse(path, e))?;
    }

    if options.filter_missing {
        fill_missing_strings(&mut df).map_err(|e| LoadError::parse(path, e))?;
    }

    debug!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "table loaded"
    );
    Ok(df)
}

/// Replaces null and blank string cells with the explicit missing marker.
///
/// Only string columns are rewritten; numeric columns keep their nulls.
fn fill_missing_strings(df: &mut DataFrame) -> polars::prelude::PolarsResult<()> {
    let names = df.get_column_names_owned();
    for name in names {
        let column = df.column(&name)?;
        if column.dtype() != &DataType::String {
            continue;
        }
        let ca = column.as_materialized_series().str()?;
        let filled: StringChunked = ca
            .iter()
            .map(|opt| match opt {
                Some(s) if !s.trim().is_empty() => Some(s),
                _ => Some(MISSING_MARKER),
            })
            .collect();
        df.replace(&name, filled.into_series().with_name(name.clone()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_filtered_load_substitutes_marker() {
        let file = temp_csv("name,age\nalice,30\n  ,40\n");
        let df = load_table(file.path(), &LoadOptions::default()).unwrap();
        let names = df.column("name").unwrap();
        assert_eq!(names.get(1).unwrap(), AnyValue::String(MISSING_MARKER));
    }

    #[test]
    fn test_raw_load_keeps_blanks() {
        let file = temp_csv("name,age\nalice,30\n  ,40\n");
        let df = load_table(file.path(), &LoadOptions::raw()).unwrap();
        let names = df.column("name").unwrap();
        assert_eq!(names.get(1).unwrap(), AnyValue::String("  "));
    }

    #[test]
    fn test_column_cap() {
        let file = temp_csv("a,b,c,d\n1,2,3,4\n");
        let options = LoadOptions {
            max_columns: 2,
            ..LoadOptions::default()
        };
        let df = load_table(file.path(), &options).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.get_column_names()[0].as_str(), "a");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_table(Path::new("data.parquet"), &LoadOptions::default());
        assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_numeric_nulls_survive_filtering() {
        let file = temp_csv("age\n30\n\n40\n");
        let df = load_table(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(df.column("age").unwrap().null_count(), 1);
    }
}
