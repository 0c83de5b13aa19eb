//! Per-column descriptive statistics producing Feature records.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use dataprof_model::limits::TOP_N;
use dataprof_model::{
    DatasetRef, Feature, VariableType, any_to_f64, any_to_string, is_missing_value,
    round3, round3_opt,
};

use crate::inference::{classify_column, uniqueness_ratio};

/// Profile every column of a loaded table.
///
/// Columns are processed independently; one column that cannot be
/// classified yields a record with Unknown classification and null
/// statistics rather than aborting the table.
pub fn profile_table(df: &DataFrame, dataset: &DatasetRef) -> Vec<Feature> {
    df.get_columns()
        .iter()
        .enumerate()
        .map(|(index, column)| profile_column(column, index, dataset))
        .collect()
}

/// Profile a single column.
pub fn profile_column(column: &Column, index: usize, dataset: &DatasetRef) -> Feature {
    let name = column.name().to_string();
    let class = classify_column(column);

    let mut feat = Feature::new(&name, index);
    feat.feat_datatype = class
        .physical
        .map_or_else(|| "Unknown".to_string(), |p| p.label().to_string());
    feat.feat_vartype = vartype_label(&name, class.variable, dataset);

    let (non_missing, missing) = count_missing(column);
    let total = non_missing + missing;
    feat.feat_count = non_missing;
    feat.feat_missing = format_missing(missing, total);

    let frequencies = value_frequencies(column);
    feat.feat_unique = frequencies.len() as u64;

    match class.physical {
        Some(p) if p.is_numeric() => {
            let values = numeric_values(column);
            fill_numeric(&mut feat, &values);
        }
        Some(_) => fill_categorical(&mut feat, &frequencies),
        None => {
            debug!(column = %name, "column has no scalar interpretation");
        }
    }

    let uniqueness = uniqueness_ratio(column);
    if non_missing > 0 && (uniqueness - 1.0).abs() < f64::EPSILON {
        feat.feat_warnings.push("all values unique".to_string());
    }
    if total > 0 && missing * 2 >= total {
        feat.feat_warnings.push("missing in >=50% of rows".to_string());
    }
    if missing == 0 {
        feat.feat_notes.push("no missing values".to_string());
    }

    feat
}

/// Variable-type label, suffixed when the column is the declared id or
/// label column of the dataset.
fn vartype_label(name: &str, variable: VariableType, dataset: &DatasetRef) -> String {
    let base = variable.label();
    if dataset.id_column.as_deref() == Some(name) {
        format!("{base} (ID)")
    } else if dataset.label_column.as_deref() == Some(name) {
        format!("{base} (Label)")
    } else {
        base.to_string()
    }
}

fn format_missing(missing: u64, total: u64) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        missing as f64 * 100.0 / total as f64
    };
    format!("{missing} ({}%)", round3(percent))
}

fn count_missing(column: &Column) -> (u64, u64) {
    let mut non_missing = 0u64;
    let mut missing = 0u64;
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_value(&value) {
            missing += 1;
        } else {
            non_missing += 1;
        }
    }
    (non_missing, missing)
}

/// Frequency table over non-missing values, keyed by string form.
fn value_frequencies(column: &Column) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_value(&value) {
            continue;
        }
        *counts.entry(any_to_string(value)).or_insert(0u64) += 1;
    }
    counts
}

fn numeric_values(column: &Column) -> Vec<f64> {
    let mut values: Vec<f64> = (0..column.len())
        .filter_map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

fn fill_numeric(feat: &mut Feature, sorted: &[f64]) {
    if sorted.is_empty() {
        return;
    }
    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;

    feat.feat_average = Some(round3(mean));
    feat.feat_median = Some(round3(quantile(sorted, 0.5)));
    feat.feat_mode = mode(sorted);
    feat.feat_max = sorted.last().map(|v| round3(*v));
    feat.feat_min = sorted.first().map(|v| round3(*v));

    let variance = sample_variance(sorted, mean);
    feat.feat_variance = round3_opt(variance);
    feat.feat_stddev = round3_opt(variance.map(f64::sqrt));

    let q25 = quantile(sorted, 0.25);
    let q75 = quantile(sorted, 0.75);
    feat.feat_quantile25 = Some(round3(q25));
    feat.feat_quantile75 = Some(round3(q75));
    feat.feat_iqr = Some(round3(q75 - q25));
    feat.feat_skew = round3_opt(skewness(sorted, mean));
    feat.feat_kurtosis = round3_opt(excess_kurtosis(sorted, mean));
    feat.feat_outlierscore = Some(
        sorted
            .iter()
            .filter(|v| **v >= q25 && **v <= q75)
            .count() as u64,
    );
}

fn fill_categorical(feat: &mut Feature, frequencies: &BTreeMap<String, u64>) {
    if frequencies.is_empty() {
        return;
    }

    // Most common first: count descending, value ascending on ties.
    let mut ranked: Vec<(&String, u64)> = frequencies.iter().map(|(v, c)| (v, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let (top_value, top_count) = ranked[0];
    feat.feat_mostcommon = Some(format!("{top_value} ({top_count})"));
    feat.feat_5_mostcommon_values = ranked
        .iter()
        .take(TOP_N)
        .map(|(v, _)| (*v).clone())
        .collect();
    feat.feat_5_mostcommon_counts = ranked.iter().take(TOP_N).map(|(_, c)| *c).collect();

    let (last_value, last_count) = ranked[ranked.len() - 1];
    feat.feat_leastcommon = Some(format!("{last_value} ({last_count})"));
    let bottom: Vec<(&String, u64)> = ranked.iter().rev().take(TOP_N).copied().collect();
    feat.feat_5_leastcommon_values = bottom.iter().map(|(v, _)| (*v).clone()).collect();
    feat.feat_5_leastcommon_counts = bottom.iter().map(|(_, c)| *c).collect();

    feat.feat_max_length = frequencies.keys().map(|v| v.chars().count() as u64).max();
    feat.feat_min_length = frequencies.keys().map(|v| v.chars().count() as u64).min();
}

/// Linear-interpolation quantile over sorted non-missing values.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let weight = pos - lo as f64;
        sorted[lo] * (1.0 - weight) + sorted[hi] * weight
    }
}

/// Sample variance (ddof = 1); `None` below two values.
fn sample_variance(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(ss / (n - 1) as f64)
}

/// Adjusted Fisher-Pearson skewness; `None` below three values or with
/// zero spread.
fn skewness(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m3: f64 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Unbiased excess kurtosis (G2); `None` below four values or with zero
/// spread.
fn excess_kurtosis(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let nf = n as f64;
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m4: f64 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return None;
    }
    let g2 = m4 / m2.powi(2) - 3.0;
    Some(((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0)))
}

/// Space-joined modal values, or `None` when every value is unique.
fn mode(sorted: &[f64]) -> Option<String> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for v in sorted {
        *counts.entry(dataprof_model::polars::format_numeric(*v)).or_insert(0) += 1;
    }
    let max = counts.values().copied().max()?;
    if max <= 1 {
        return None;
    }
    let modal: Vec<String> = counts
        .into_iter()
        .filter(|(_, c)| *c == max)
        .map(|(v, _)| v)
        .collect();
    Some(modal.join(" "))
}
