//! Terminal summary tables for profile results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use dataprof_cli::pipeline::ProfileOutcome;

pub fn print_profile_summary(outcome: &ProfileOutcome) {
    println!("Dataset: {}", outcome.dataset.title);
    println!("Artifacts: {}", outcome.folder.display());
    if let (Some(rows), Some(columns)) = (
        outcome.summary.get("rows").and_then(Value::as_u64),
        outcome.summary.get("columns").and_then(Value::as_u64),
    ) {
        println!("Shape: {rows} rows x {columns} columns");
    }
    if outcome.from_cache {
        println!("(served from cache)");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Variable"),
        header_cell("Missing"),
        header_cell("Unique"),
        header_cell("PII"),
        header_cell("PII Type"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    align_column(&mut table, 7, CellAlignment::Right);

    let empty = Vec::new();
    let features = outcome.features.as_array().unwrap_or(&empty);
    for feature in features {
        table.add_row(vec![
            Cell::new(field_str(feature, "feat_physical_name")),
            Cell::new(field_str(feature, "feat_datatype")),
            Cell::new(field_str(feature, "feat_vartype")),
            Cell::new(field_str(feature, "feat_missing")),
            Cell::new(field_u64(feature, "feat_unique")),
            pii_cell(feature),
            Cell::new(field_str(feature, "feat_pii_type")),
            errors_cell(feature),
        ]);
    }
    println!("{table}");

    if outcome.violation_count > 0 {
        println!("{} rule violation(s) recorded", outcome.violation_count);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn pii_cell(feature: &Value) -> Cell {
    if feature.get("feat_is_pii").and_then(Value::as_bool) == Some(true) {
        Cell::new("yes").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new("no")
    }
}

fn errors_cell(feature: &Value) -> Cell {
    let count = feature.get("feat_errors").and_then(Value::as_u64).unwrap_or(0);
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count)
    }
}

fn field_str<'a>(feature: &'a Value, key: &str) -> &'a str {
    feature.get(key).and_then(Value::as_str).unwrap_or("")
}

fn field_u64(feature: &Value, key: &str) -> u64 {
    feature.get(key).and_then(Value::as_u64).unwrap_or(0)
}
