//! Per-column PII scoring: pattern detectors + entity recognition, fused
//! into one score mapping with suppression and winner selection.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use dataprof_model::limits::{NER_SAMPLE_SIZE, SUPPRESSION_THRESHOLD};
use dataprof_model::{FeaturePii, PiiScore, any_to_string, is_missing_value};

use crate::address::{AddressTokenizer, UsStreetTokenizer};
use crate::detectors::{CATEGORIES, cell_matches};
use crate::ner::{EntityRecognizer, HeuristicRecognizer, label_counts};

/// Categories whose scores are zeroed at or below the suppression
/// threshold, to keep ordinary numeric and date columns out of the verdict.
const SUPPRESSED_CATEGORIES: &[&str] = &["zip_codes", "dates", "QUANTITY"];

/// PII scorer over a table.
///
/// Holds the two collaborator seams: the entity recognizer and the address
/// tokenizer. Defaults wire the shipped heuristic implementations.
pub struct PiiScorer {
    recognizer: Box<dyn EntityRecognizer>,
    tokenizer: Box<dyn AddressTokenizer>,
}

impl Default for PiiScorer {
    fn default() -> Self {
        Self {
            recognizer: Box::new(HeuristicRecognizer),
            tokenizer: Box::new(UsStreetTokenizer),
        }
    }
}

impl PiiScorer {
    /// Scorer with a custom entity recognizer.
    pub fn with_recognizer(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            tokenizer: Box::new(UsStreetTokenizer),
        }
    }

    /// Score every column of a table loaded with raw (unfiltered) strings.
    pub fn score_table(&self, df: &DataFrame) -> Vec<FeaturePii> {
        df.get_columns()
            .iter()
            .map(|column| self.score_column(column))
            .collect()
    }

    /// Score one column.
    pub fn score_column(&self, column: &Column) -> FeaturePii {
        let name = column.name().to_string();
        let cells = string_cells(column);

        let pattern_scores = self.pattern_scores(&cells);
        let ner_scores = self.ner_scores(&cells);
        let fused = fuse(pattern_scores, ner_scores);

        debug!(column = %name, categories = fused.len(), "column scored");
        FeaturePii::from_scores(name, fused)
    }

    /// Detector scores: matches over non-missing cells as an integer percent.
    fn pattern_scores(&self, cells: &[String]) -> BTreeMap<String, u32> {
        let non_missing = cells.len();
        let mut scores = BTreeMap::new();
        if non_missing == 0 {
            return scores;
        }

        for category in CATEGORIES {
            let matches = cells
                .iter()
                .filter(|cell| cell_matches(category, cell, self.tokenizer.as_ref()))
                .count();
            let score = percent(matches, non_missing);
            if score > 0 {
                scores.insert((*category).to_string(), suppress(category, score));
            }
        }
        scores
    }

    /// Entity-label scores over a bounded prefix of the column.
    fn ner_scores(&self, cells: &[String]) -> BTreeMap<String, u32> {
        let sample: Vec<&String> = cells.iter().take(NER_SAMPLE_SIZE).collect();
        let mut scores = BTreeMap::new();
        if sample.is_empty() {
            return scores;
        }

        let mut tallies: BTreeMap<String, usize> = BTreeMap::new();
        for cell in &sample {
            for entity in self.recognizer.recognize(cell) {
                // QUANTITY passes the exclusion filter; it is handled by
                // suppression instead.
                if label_counts(&entity.label) {
                    *tallies.entry(entity.label).or_insert(0) += 1;
                }
            }
        }

        for (label, count) in tallies {
            let score = percent(count, sample.len());
            if score > 0 {
                scores.insert(label.clone(), suppress(&label, score));
            }
        }
        scores
    }
}

/// Non-missing cells of a column, stringified.
fn string_cells(column: &Column) -> Vec<String> {
    (0..column.len())
        .filter_map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if is_missing_value(&value) {
                None
            } else {
                Some(any_to_string(value))
            }
        })
        .collect()
}

fn percent(count: usize, total: usize) -> u32 {
    (count as f64 * 100.0 / total as f64).round() as u32
}

/// Zero the score of a suppressed category at or below the threshold.
fn suppress(category: &str, score: u32) -> u32 {
    if SUPPRESSED_CATEGORIES.contains(&category) && score <= SUPPRESSION_THRESHOLD {
        0
    } else {
        score
    }
}

/// Merge the two score mappings.
///
/// A category present in both keeps both contributions as a nested pair;
/// overlapping keys are never summed.
fn fuse(
    pattern: BTreeMap<String, u32>,
    ner: BTreeMap<String, u32>,
) -> BTreeMap<String, PiiScore> {
    let mut fused: BTreeMap<String, PiiScore> = pattern
        .into_iter()
        .map(|(category, score)| (category, PiiScore::Single(score)))
        .collect();

    for (category, ner_score) in ner {
        match fused.get(&category).copied() {
            Some(PiiScore::Single(pattern_score)) => {
                fused.insert(
                    category,
                    PiiScore::Merged {
                        pattern: pattern_score,
                        ner: ner_score,
                    },
                );
            }
            Some(PiiScore::Merged { .. }) | None => {
                fused.entry(category).or_insert(PiiScore::Single(ner_score));
            }
        }
    }
    fused
}
