//! CSV/TSV reading into a Polars DataFrame.

use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};

use crate::error::{LoadError, Result};

/// Reads a delimited file with a row cap.
///
/// Ragged lines (rows whose cell count disagrees with the header) are
/// truncated instead of failing the whole load, mirroring the fallback of
/// loading without a fixed column list.
pub fn read_delimited(path: &Path, separator: u8, max_rows: usize) -> Result<DataFrame> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let parse_options = CsvParseOptions::default()
        .with_separator(separator)
        .with_truncate_ragged_lines(true);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(Some(max_rows))
        .with_infer_schema_length(Some(100))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::parse(path, e))?
        .finish()
        .map_err(|e| LoadError::parse(path, e))?;

    if df.height() == 0 || df.width() == 0 {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    Ok(df)
}
