//! Excel reading via calamine (xls, xlsx, xlsm, xlsb).
//!
//! The first worksheet is read eagerly: row 0 supplies the column names and
//! each column is built as a typed Polars series when every cell agrees on a
//! scalar type, falling back to strings otherwise.

use std::path::Path;

use calamine::{Data, DataType as _, Reader as _, open_workbook_auto};
use polars::prelude::{
    BooleanChunked, DataFrame, Float64Chunked, Int64Chunked, IntoSeries, Series, StringChunked,
};

use crate::error::{LoadError, Result};

/// Reads the first sheet of an Excel workbook with a row cap.
pub fn read_excel(path: &Path, max_rows: usize) -> Result<DataFrame> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::parse(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyTable {
            path: path.to_path_buf(),
        })?
        .map_err(|e| LoadError::parse(path, e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    };

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.as_string().unwrap_or_default();
            if name.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect();

    let data_rows: Vec<&[Data]> = rows.take(max_rows).collect();
    if data_rows.is_empty() {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(col_idx, name)| {
            let cells: Vec<Option<&Data>> =
                data_rows.iter().map(|row| row.get(col_idx)).collect();
            column_to_series(name, &cells).into()
        })
        .collect();

    DataFrame::new(columns).map_err(|e| LoadError::parse(path, e))
}

/// Builds the narrowest series the column's cells allow.
fn column_to_series(name: &str, cells: &[Option<&Data>]) -> Series {
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    let mut any_value = false;

    for cell in cells.iter().flatten() {
        if cell.is_empty() {
            continue;
        }
        any_value = true;
        all_int &= cell.is_int() || whole_float(cell);
        all_float &= cell.is_int() || cell.is_float();
        all_bool &= cell.is_bool();
    }

    if any_value && all_bool {
        let ca: BooleanChunked = cells
            .iter()
            .map(|cell| cell.and_then(|c| c.get_bool()))
            .collect();
        return ca.into_series().with_name(name.into());
    }
    if any_value && all_int {
        let ca: Int64Chunked = cells
            .iter()
            .map(|cell| cell.and_then(cell_to_i64))
            .collect();
        return ca.into_series().with_name(name.into());
    }
    if any_value && all_float {
        let ca: Float64Chunked = cells
            .iter()
            .map(|cell| cell.and_then(|c| c.as_f64()))
            .collect();
        return ca.into_series().with_name(name.into());
    }

    let ca: StringChunked = cells
        .iter()
        .map(|cell| {
            cell.and_then(|c| {
                if c.is_empty() {
                    None
                } else {
                    c.as_string()
                }
            })
        })
        .collect();
    ca.into_series().with_name(name.into())
}

fn whole_float(cell: &Data) -> bool {
    matches!(cell, Data::Float(v) if v.fract() == 0.0)
}

fn cell_to_i64(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(v) => Some(*v),
        Data::Float(v) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_column_inference() {
        let a = Data::Int(1);
        let b = Data::Float(2.0);
        let series = column_to_series("n", &[Some(&a), Some(&b), None]);
        assert_eq!(series.dtype(), &polars::prelude::DataType::Int64);
    }

    #[test]
    fn test_mixed_column_is_string() {
        let a = Data::Int(1);
        let b = Data::String("x".to_string());
        let series = column_to_series("m", &[Some(&a), Some(&b)]);
        assert_eq!(series.dtype(), &polars::prelude::DataType::String);
    }

    #[test]
    fn test_missing_excel_file() {
        let result = read_excel(Path::new("/nope/sheet.xlsx"), 10);
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }
}
