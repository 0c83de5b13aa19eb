//! Artifact kinds and their on-disk file names.

use std::fmt;

/// Subfolder reserved for rendered plots.
pub const GRAPHS_DIR: &str = "graphs";

/// The JSON artifacts cached per dataset folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Per-column feature records (`features.json`).
    Features,
    /// Full per-column PII records (`pii_json.json`).
    PiiRecords,
    /// Winner-only PII map (`pii.json`).
    PiiMap,
    /// d3 flare tree of PII scores (`pii_flare.json`).
    PiiFlare,
    /// Table-level summary (`summary.json`).
    Summary,
    /// Rule violations (`errors.json`).
    Errors,
    /// Top value counts per column (`frequency_stats.json`).
    FrequencyStats,
}

impl ArtifactKind {
    /// Every kind, in the order the profiling pipeline produces them.
    pub const ALL: [ArtifactKind; 7] = [
        ArtifactKind::Features,
        ArtifactKind::PiiRecords,
        ArtifactKind::PiiMap,
        ArtifactKind::PiiFlare,
        ArtifactKind::Summary,
        ArtifactKind::Errors,
        ArtifactKind::FrequencyStats,
    ];

    /// File name inside the dataset folder.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Features => "features.json",
            ArtifactKind::PiiRecords => "pii_json.json",
            ArtifactKind::PiiMap => "pii.json",
            ArtifactKind::PiiFlare => "pii_flare.json",
            ArtifactKind::Summary => "summary.json",
            ArtifactKind::Errors => "errors.json",
            ArtifactKind::FrequencyStats => "frequency_stats.json",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<_> = ArtifactKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ArtifactKind::ALL.len());
    }
}
