//! PII discovery over tabular columns.
//!
//! Two independent signal sources are scored per column and fused:
//!
//! - **Pattern detectors**: a fixed registry of regex/heuristic detectors
//!   applied to every cell (emails, phones, addresses, zips, cards, ...).
//! - **Entity recognition**: an [`EntityRecognizer`] run over a bounded
//!   prefix of rows, tallying labels that indicate personal content.
//!
//! Fusion keeps both sources visible on collision, suppression knocks out
//! weak zip/date/quantity signals, and the winning category decides the
//! `is_pii` verdict.
//!
//! # Example
//!
//! ```ignore
//! use dataprof_pii::PiiScorer;
//!
//! let records = PiiScorer::default().score_table(&raw_df);
//! ```

pub mod address;
pub mod detectors;
pub mod flare;
pub mod ner;
pub mod scorer;

// === Scoring ===
pub use scorer::PiiScorer;

// === Collaborator Seams ===
pub use address::{AddressTokenizer, TokenClass, UsStreetTokenizer};
pub use ner::{Entity, EntityRecognizer, HeuristicRecognizer};

// === Report Shapes ===
pub use flare::{build_flare_tree, build_pii_map};
