//! Column profiling: type inference and descriptive statistics.
//!
//! Turns a loaded table into per-column [`Feature`](dataprof_model::Feature)
//! records plus dataset-level summary and frequency artifacts.
//!
//! # Example
//!
//! ```ignore
//! use dataprof_model::DatasetRef;
//! use dataprof_profile::profile_table;
//!
//! let dataset = DatasetRef::new("us-500.csv");
//! let features = profile_table(&df, &dataset);
//! ```

pub mod inference;
pub mod stats;
pub mod summary;

// === Type Inference ===
pub use inference::{Classification, classify_column, uniqueness_ratio};

// === Statistics ===
pub use stats::{profile_column, profile_table};

// === Dataset Artifacts ===
pub use summary::{build_frequency_stats, build_summary};
