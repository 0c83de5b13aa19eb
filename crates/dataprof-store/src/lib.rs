//! Cached artifact storage for profiling reports.
//!
//! Every dataset owns one folder (under the data root, or the upload root
//! for user uploads) holding its JSON artifacts, a copy of the raw source
//! file, and a `graphs/` subfolder. Artifacts are written atomically and
//! trusted once present: [`ArtifactStore::compute_if_absent`] returns the
//! cache when it exists and only invokes the compute closure on a miss.

pub mod artifact;
pub mod error;
pub mod store;

pub use artifact::{ArtifactKind, GRAPHS_DIR};
pub use error::{Result, StoreError};
pub use store::ArtifactStore;
