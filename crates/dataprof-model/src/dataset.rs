//! Dataset identity.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reference to a selected or uploaded dataset.
///
/// Identifies the raw file, the title used as the artifact folder name, the
/// optional declared id/label columns, and which storage root the dataset
/// lives under. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Raw data file name, e.g. `us-500.csv`.
    pub file_name: String,
    /// Dataset title; names the per-dataset artifact folder.
    pub title: String,
    /// Declared identifier column, if any.
    pub id_column: Option<String>,
    /// Declared label column, if any.
    pub label_column: Option<String>,
    /// True when the dataset was uploaded rather than pre-provisioned.
    pub uploaded: bool,
}

impl DatasetRef {
    /// Create a reference with the title derived from the file stem.
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let title = Path::new(&file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&file_name)
            .to_string();
        Self {
            file_name,
            title,
            id_column: None,
            label_column: None,
            uploaded: false,
        }
    }

    /// Set the dataset title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the declared identifier column.
    #[must_use]
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Set the declared label column.
    #[must_use]
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    /// Mark the dataset as uploaded.
    #[must_use]
    pub fn with_uploaded(mut self, uploaded: bool) -> Self {
        self.uploaded = uploaded;
        self
    }

    /// Folder holding the raw file and derived artifacts, under the root
    /// selected by the uploaded flag.
    pub fn folder(&self, data_root: &Path, upload_root: &Path) -> PathBuf {
        let root = if self.uploaded { upload_root } else { data_root };
        root.join(&self.title)
    }

    /// Path of the raw data file inside the dataset folder.
    pub fn data_path(&self, data_root: &Path, upload_root: &Path) -> PathBuf {
        self.folder(data_root, upload_root).join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_file_stem() {
        let ds = DatasetRef::new("us-500.csv");
        assert_eq!(ds.title, "us-500");
        assert_eq!(ds.file_name, "us-500.csv");
        assert!(!ds.uploaded);
    }

    #[test]
    fn test_folder_selection_by_uploaded_flag() {
        let data_root = Path::new("/srv/data");
        let upload_root = Path::new("/srv/uploads");

        let ds = DatasetRef::new("a.csv");
        assert_eq!(ds.folder(data_root, upload_root), Path::new("/srv/data/a"));

        let up = DatasetRef::new("a.csv").with_uploaded(true);
        assert_eq!(
            up.folder(data_root, upload_root),
            Path::new("/srv/uploads/a")
        );
    }

    #[test]
    fn test_builder() {
        let ds = DatasetRef::new("t.csv")
            .with_title("trial")
            .with_id_column("id")
            .with_label_column("outcome");
        assert_eq!(ds.title, "trial");
        assert_eq!(ds.id_column.as_deref(), Some("id"));
        assert_eq!(ds.label_column.as_deref(), Some("outcome"));
    }
}
