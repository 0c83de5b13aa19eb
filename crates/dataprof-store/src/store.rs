//! Per-dataset artifact store with a write-once cache discipline.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use dataprof_model::{DatasetRef, blank_nulls};

use crate::artifact::{ArtifactKind, GRAPHS_DIR};
use crate::error::{Result, StoreError};

/// Filesystem store of profiling artifacts, keyed by dataset and kind.
///
/// Artifacts are trusted once written; there is no invalidation. A stale
/// cache after the source file changes is accepted, callers delete the
/// dataset folder to force a recompute. Concurrent `compute_if_absent`
/// calls may both compute; the last rename wins and both see valid JSON.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    data_root: PathBuf,
    upload_root: PathBuf,
}

impl ArtifactStore {
    pub fn new(data_root: impl Into<PathBuf>, upload_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            upload_root: upload_root.into(),
        }
    }

    /// Folder holding this dataset's artifacts.
    pub fn dataset_folder(&self, dataset: &DatasetRef) -> PathBuf {
        dataset.folder(&self.data_root, &self.upload_root)
    }

    /// Full path of one artifact.
    pub fn artifact_path(&self, dataset: &DatasetRef, kind: ArtifactKind) -> PathBuf {
        self.dataset_folder(dataset).join(kind.file_name())
    }

    /// Create the dataset folder and its `graphs/` subfolder.
    pub fn prepare(&self, dataset: &DatasetRef) -> Result<PathBuf> {
        let folder = self.dataset_folder(dataset);
        let graphs = folder.join(GRAPHS_DIR);
        fs::create_dir_all(&graphs).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: graphs,
            source: e,
        })?;
        Ok(folder)
    }

    pub fn exists(&self, dataset: &DatasetRef, kind: ArtifactKind) -> bool {
        self.artifact_path(dataset, kind).exists()
    }

    /// Read a cached artifact back as JSON.
    pub fn read(&self, dataset: &DatasetRef, kind: ArtifactKind) -> Result<Value> {
        let path = self.artifact_path(dataset, kind);
        let text = fs::read_to_string(&path).map_err(|e| StoreError::Io {
            operation: "read",
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt { path, source: e })
    }

    /// Write an artifact, normalizing JSON nulls to empty strings first.
    ///
    /// Atomic: the document lands in a temp file in the same folder and is
    /// renamed into place, so readers never observe a partial artifact.
    pub fn write(&self, dataset: &DatasetRef, kind: ArtifactKind, mut value: Value) -> Result<()> {
        blank_nulls(&mut value);
        let path = self.artifact_path(dataset, kind);
        self.prepare(dataset)?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        let text = serde_json::to_string_pretty(&value).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            source: e,
        })?;
        file.write_all(text.as_bytes()).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path,
            target_path: path.clone(),
            source: e,
        })?;

        info!(artifact = %kind, path = %path.display(), "artifact written");
        Ok(())
    }

    /// Return the cached artifact, computing and caching it on a miss.
    pub fn compute_if_absent<F>(
        &self,
        dataset: &DatasetRef,
        kind: ArtifactKind,
        compute: F,
    ) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        if self.exists(dataset, kind) {
            debug!(artifact = %kind, "cache hit");
            return self.read(dataset, kind);
        }
        let value = compute()?;
        self.write(dataset, kind, value)?;
        self.read(dataset, kind)
    }

    /// Copy the raw source file into the dataset folder, next to the
    /// artifacts, so the folder is self-contained.
    pub fn stash_source(&self, dataset: &DatasetRef, source: &Path) -> Result<PathBuf> {
        let folder = self.prepare(dataset)?;
        let target = folder.join(&dataset.file_name);
        if target != source {
            fs::copy(source, &target).map_err(|e| StoreError::Io {
                operation: "copy",
                path: target.clone(),
                source: e,
            })?;
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, ArtifactStore, DatasetRef) {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"), dir.path().join("uploads"));
        let dataset = DatasetRef::new("us-500.csv").with_title("us-500");
        (dir, store, dataset)
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (_dir, store, ds) = setup();
        let value = json!([{"feat_name": "zip", "feat_mean": "1.000"}]);
        store.write(&ds, ArtifactKind::Features, value.clone()).unwrap();
        assert!(store.exists(&ds, ArtifactKind::Features));
        assert_eq!(store.read(&ds, ArtifactKind::Features).unwrap(), value);
    }

    #[test]
    fn test_write_blanks_nulls() {
        let (_dir, store, ds) = setup();
        store
            .write(&ds, ArtifactKind::Features, json!([{"feat_mean": null}]))
            .unwrap();
        let back = store.read(&ds, ArtifactKind::Features).unwrap();
        assert_eq!(back, json!([{"feat_mean": ""}]));
    }

    #[test]
    fn test_prepare_creates_graphs_folder() {
        let (_dir, store, ds) = setup();
        let folder = store.prepare(&ds).unwrap();
        assert!(folder.join(GRAPHS_DIR).is_dir());
    }

    #[test]
    fn test_compute_if_absent_caches() {
        let (_dir, store, ds) = setup();
        let calls = Cell::new(0u32);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(json!({"rows": 3}))
        };

        let first = store
            .compute_if_absent(&ds, ArtifactKind::Summary, compute)
            .unwrap();
        let second = store
            .compute_if_absent(&ds, ArtifactKind::Summary, || {
                calls.set(calls.get() + 1);
                Ok(json!({"rows": 999}))
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_writer_wins() {
        // Two overlapping computes are allowed; the later write replaces
        // the earlier one wholesale.
        let (_dir, store, ds) = setup();
        store.write(&ds, ArtifactKind::Summary, json!({"rows": 1})).unwrap();
        store.write(&ds, ArtifactKind::Summary, json!({"rows": 2})).unwrap();
        assert_eq!(
            store.read(&ds, ArtifactKind::Summary).unwrap(),
            json!({"rows": 2})
        );
    }

    #[test]
    fn test_uploaded_flag_selects_root() {
        let (dir, store, _) = setup();
        let uploaded = DatasetRef::new("x.csv").with_title("x").with_uploaded(true);
        store.prepare(&uploaded).unwrap();
        assert!(dir.path().join("uploads").join("x").is_dir());
        assert!(!dir.path().join("data").join("x").exists());
    }

    #[test]
    fn test_stash_source() {
        let (dir, store, ds) = setup();
        let src = dir.path().join("us-500.csv");
        std::fs::write(&src, "zip\n70116\n").unwrap();
        let target = store.stash_source(&ds, &src).unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "zip\n70116\n");
    }
}
