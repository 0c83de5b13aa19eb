//! Bounded tabular ingestion for dataset profiling.
//!
//! Loads a sample of a CSV, TSV, or Excel file into a Polars DataFrame,
//! subject to row/column caps, with caller-controlled missing-value
//! substitution.
//!
//! # Example
//!
//! ```ignore
//! use dataprof_ingest::{LoadOptions, load_table};
//!
//! let df = load_table("data/us-500.csv".as_ref(), &LoadOptions::default())?;
//! let raw = load_table("data/us-500.csv".as_ref(), &LoadOptions::raw())?;
//! ```

mod csv;
mod error;
mod excel;
mod loader;

// === Error Types ===
pub use error::{LoadError, Result};

// === Loading ===
pub use loader::{LoadOptions, load_table};
