//! Fixed policy constants shared across the workspace.

/// Maximum number of rows loaded from a dataset.
pub const MAX_ROWS: usize = 10_000;

/// Maximum number of columns loaded from a dataset.
pub const MAX_COLUMNS: usize = 500;

/// Uniqueness ratio below which a numeric column is treated as Categorical.
pub const UNIQUENESS_CUTOFF: f64 = 0.10;

/// Winning PII score (integer percent) must exceed this for `is_pii = true`.
pub const PII_THRESHOLD: u32 = 50;

/// Scores at or below this are zeroed for suppressed categories
/// (`zip_codes`, `dates`, `QUANTITY`).
pub const SUPPRESSION_THRESHOLD: u32 = 80;

/// Number of leading rows fed to the entity recognizer per column.
pub const NER_SAMPLE_SIZE: usize = 30;

/// Length of the most/least-common value lists in Feature records.
pub const TOP_N: usize = 5;

/// Marker substituted for blank string cells when missing-filtering is on.
pub const MISSING_MARKER: &str = "Missing";
