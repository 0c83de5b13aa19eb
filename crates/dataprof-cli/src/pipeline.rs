//! Profiling pipeline: load, profile, score, validate, persist.
//!
//! Every artifact goes through the store's compute-if-absent gate, so a
//! re-run over an already profiled dataset reads the cached JSON and
//! recomputes nothing.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use serde_json::Value;
use tracing::{debug, info, info_span, trace, warn};

use dataprof_ingest::{LoadOptions, load_table};
use dataprof_model::{DatasetRef, Feature, FeaturePii, ValidationError};
use dataprof_pii::{PiiScorer, build_flare_tree, build_pii_map};
use dataprof_profile::{build_frequency_stats, build_summary, profile_table};
use dataprof_store::{ArtifactKind, ArtifactStore};
use dataprof_validate::{JsonRuleStore, RuleSet, ValidationRun};

use crate::logging::redact_value;

/// Everything the profile command needs, independent of the CLI surface.
pub struct ProfileRequest {
    pub file: PathBuf,
    pub title: Option<String>,
    pub id_column: Option<String>,
    pub label_column: Option<String>,
    pub uploaded: bool,
    pub data_root: PathBuf,
    pub upload_root: PathBuf,
    pub rule_store: PathBuf,
}

/// Result of one profile run, artifact values as they landed on disk.
pub struct ProfileOutcome {
    pub dataset: DatasetRef,
    pub folder: PathBuf,
    pub summary: Value,
    pub features: Value,
    pub pii_records: Value,
    pub violation_count: usize,
    pub from_cache: bool,
}

/// Profile one dataset end to end.
pub fn run_profile(request: &ProfileRequest) -> Result<ProfileOutcome> {
    let dataset = dataset_ref(request)?;
    let span = info_span!("profile", dataset = %dataset.title);
    let _guard = span.enter();

    let store = ArtifactStore::new(&request.data_root, &request.upload_root);
    let folder = store.prepare(&dataset)?;

    if ArtifactKind::ALL.iter().all(|&k| store.exists(&dataset, k)) {
        info!("all artifacts cached, skipping recompute");
        let errors = store.read(&dataset, ArtifactKind::Errors)?;
        return Ok(ProfileOutcome {
            summary: store.read(&dataset, ArtifactKind::Summary)?,
            features: store.read(&dataset, ArtifactKind::Features)?,
            pii_records: store.read(&dataset, ArtifactKind::PiiRecords)?,
            violation_count: errors.as_array().map_or(0, Vec::len),
            dataset,
            folder,
            from_cache: true,
        });
    }

    store.stash_source(&dataset, &request.file)?;

    // Two loads: statistics see blanks as the missing marker, PII scoring
    // and validation see the raw cells.
    let filtered = load_table(&request.file, &LoadOptions::default())
        .with_context(|| format!("load {}", request.file.display()))?;
    let raw = load_table(&request.file, &LoadOptions::raw())
        .with_context(|| format!("load {}", request.file.display()))?;
    info!(
        rows = filtered.height(),
        columns = filtered.width(),
        "table loaded"
    );

    let mut features = profile_table(&filtered, &dataset);
    let pii = PiiScorer::default().score_table(&raw);
    let violations = validate(request, &dataset, &raw, &store)?;
    attach_pii(&mut features, &pii);
    attach_error_counts(&mut features, &violations);

    let summary = store.compute_if_absent(&dataset, ArtifactKind::Summary, || {
        Ok(build_summary(&filtered, &dataset))
    })?;
    store.compute_if_absent(&dataset, ArtifactKind::FrequencyStats, || {
        Ok(build_frequency_stats(&filtered))
    })?;
    let features_value = serde_json::to_value(&features).context("serialize features")?;
    let features = store.compute_if_absent(&dataset, ArtifactKind::Features, || {
        Ok(features_value.clone())
    })?;
    let pii_value = serde_json::to_value(&pii).context("serialize pii records")?;
    let pii_records = store.compute_if_absent(&dataset, ArtifactKind::PiiRecords, || {
        Ok(pii_value.clone())
    })?;
    store.compute_if_absent(&dataset, ArtifactKind::PiiMap, || Ok(build_pii_map(&pii)))?;
    store.compute_if_absent(&dataset, ArtifactKind::PiiFlare, || {
        Ok(build_flare_tree(&pii))
    })?;

    Ok(ProfileOutcome {
        violation_count: violations.len(),
        dataset,
        folder,
        summary,
        features,
        pii_records,
        from_cache: false,
    })
}

fn dataset_ref(request: &ProfileRequest) -> Result<DatasetRef> {
    let file_name = request
        .file
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", request.file.display()))?
        .to_string_lossy()
        .into_owned();
    let mut dataset = DatasetRef::new(file_name).with_uploaded(request.uploaded);
    if let Some(title) = &request.title {
        dataset = dataset.with_title(title.clone());
    }
    if let Some(column) = &request.id_column {
        dataset = dataset.with_id_column(column.clone());
    }
    if let Some(column) = &request.label_column {
        dataset = dataset.with_label_column(column.clone());
    }
    Ok(dataset)
}

/// Run rule validation and persist the errors artifact.
fn validate(
    request: &ProfileRequest,
    dataset: &DatasetRef,
    raw: &DataFrame,
    store: &ArtifactStore,
) -> Result<Vec<ValidationError>> {
    let rule_store = JsonRuleStore::new(&request.rule_store);
    // Validation failures never abort a profiling request: an unreadable
    // rule store degrades to an empty rule set and an empty errors artifact.
    let rules = match RuleSet::from_store(&rule_store, &dataset.title) {
        Ok(rules) => rules,
        Err(error) => {
            warn!(%error, "rule store unreadable, validating with no rules");
            RuleSet::new()
        }
    };
    debug!(columns = rules.len(), "rule assignments loaded");

    let mut run = ValidationRun::new(&rule_store, &dataset.title);
    let violations = run.execute(raw, &rules);
    for violation in &violations {
        trace!(
            column = %violation.column,
            row = violation.row,
            value = redact_value(&violation.value.to_string()),
            "rule violation"
        );
    }

    let errors_value = serde_json::to_value(&violations).context("serialize violations")?;
    store.compute_if_absent(dataset, ArtifactKind::Errors, || Ok(errors_value.clone()))?;
    run.mark_persisted();
    Ok(violations)
}

/// Carry the winning PII verdict onto each matching feature record.
fn attach_pii(features: &mut [Feature], pii: &[FeaturePii]) {
    for feature in features.iter_mut() {
        if let Some(record) = pii
            .iter()
            .find(|p| p.feat_name == feature.feat_physical_name)
        {
            feature.feat_is_pii = record.is_pii;
            feature.feat_pii_type = record.winning_category().map(String::from);
        }
    }
}

/// Carry per-column violation counts onto the feature records.
fn attach_error_counts(features: &mut [Feature], violations: &[ValidationError]) {
    for feature in features.iter_mut() {
        feature.feat_errors = violations
            .iter()
            .filter(|v| v.column == feature.feat_physical_name)
            .count() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(file: &str) -> ProfileRequest {
        ProfileRequest {
            file: PathBuf::from(file),
            title: None,
            id_column: None,
            label_column: None,
            uploaded: false,
            data_root: PathBuf::from("data"),
            upload_root: PathBuf::from("uploads"),
            rule_store: PathBuf::from("rules.json"),
        }
    }

    #[test]
    fn test_title_defaults_to_stem() {
        let dataset = dataset_ref(&request("fixtures/us-500.csv")).unwrap();
        assert_eq!(dataset.title, "us-500");
        assert_eq!(dataset.file_name, "us-500.csv");
    }

    #[test]
    fn test_explicit_title_wins() {
        let mut req = request("fixtures/us-500.csv");
        req.title = Some("contacts".to_string());
        assert_eq!(dataset_ref(&req).unwrap().title, "contacts");
    }

    #[test]
    fn test_attach_pii_by_name() {
        let mut features = vec![Feature::new("email", 0), Feature::new("id", 1)];
        let pii = vec![FeaturePii::from_scores(
            "email",
            [(
                "emails".to_string(),
                dataprof_model::PiiScore::Single(100),
            )]
            .into_iter()
            .collect(),
        )];
        attach_pii(&mut features, &pii);
        assert!(features[0].feat_is_pii);
        assert_eq!(features[0].feat_pii_type.as_deref(), Some("emails"));
        assert!(!features[1].feat_is_pii);
    }
}
