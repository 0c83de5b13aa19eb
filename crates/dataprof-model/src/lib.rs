//! Core data model for the dataprof workspace.
//!
//! This crate defines the types shared by every profiling stage:
//!
//! - **Column classification**: closed [`PhysicalType`] / [`VariableType`] enums
//! - **Records**: [`Feature`], [`FeaturePii`], [`ValidationError`] wire shapes
//! - **Dataset identity**: [`DatasetRef`] naming a table and its artifact folder
//! - **Formatting**: shared 3-decimal rounding and null-blanking for JSON output
//! - **Polars helpers**: `AnyValue` conversions used by all cell-walking code

pub mod dataset;
pub mod enums;
pub mod feature;
pub mod format;
pub mod limits;
pub mod pii;
pub mod polars;
pub mod violation;

// === Column classification ===
pub use enums::{PhysicalType, VariableType};

// === Records ===
pub use feature::Feature;
pub use pii::{FeaturePii, PiiScore};
pub use violation::ValidationError;

// === Dataset identity ===
pub use dataset::DatasetRef;

// === Formatting ===
pub use format::{blank_nulls, round3, round3_opt};

// === Polars helpers ===
pub use polars::{any_to_f64, any_to_json, any_to_string, is_missing_value};
