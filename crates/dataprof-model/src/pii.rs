//! Per-column PII record and score shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::limits::PII_THRESHOLD;

/// Score for one PII category.
///
/// Normally a single integer percentage. When the pattern detectors and the
/// entity recognizer both scored the same category, fusion keeps the two
/// contributions visible as a nested pair instead of summing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PiiScore {
    Single(u32),
    Merged { pattern: u32, ner: u32 },
}

impl PiiScore {
    /// The value a merged score competes with: the larger contribution.
    pub fn effective(&self) -> u32 {
        match *self {
            Self::Single(v) => v,
            Self::Merged { pattern, ner } => pattern.max(ner),
        }
    }
}

impl From<u32> for PiiScore {
    fn from(value: u32) -> Self {
        Self::Single(value)
    }
}

/// PII verdict for one column.
///
/// Invariant: `is_pii` is true iff the winning category's effective score
/// exceeds [`PII_THRESHOLD`]. Immutable once persisted (write-once cache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePii {
    pub feat_name: String,
    pub is_pii: bool,
    /// Exactly one entry: the winning category and its score.
    pub most_likely_pii_type: BTreeMap<String, PiiScore>,
    /// Every evaluated category and its score.
    pub pii_types_and_scores: BTreeMap<String, PiiScore>,
}

impl FeaturePii {
    /// Build a record from a fused score mapping, selecting the winner.
    ///
    /// Ties break toward the lexicographically first category so repeated
    /// runs over the same data produce identical artifacts.
    pub fn from_scores(
        name: impl Into<String>,
        scores: BTreeMap<String, PiiScore>,
    ) -> Self {
        let winner = scores
            .iter()
            .max_by(|(a_key, a), (b_key, b)| {
                a.effective()
                    .cmp(&b.effective())
                    .then_with(|| b_key.cmp(a_key))
            })
            .map(|(category, score)| (category.clone(), PiiScore::Single(score.effective())));

        let mut most_likely = BTreeMap::new();
        let mut is_pii = false;
        if let Some((category, score)) = winner {
            is_pii = score.effective() > PII_THRESHOLD;
            most_likely.insert(category, score);
        }

        Self {
            feat_name: name.into(),
            is_pii,
            most_likely_pii_type: most_likely,
            pii_types_and_scores: scores,
        }
    }

    /// Winning category name, if any category was evaluated.
    pub fn winning_category(&self) -> Option<&str> {
        self.most_likely_pii_type.keys().next().map(String::as_str)
    }

    /// Winning effective score, 0 when nothing was evaluated.
    pub fn winning_score(&self) -> u32 {
        self.most_likely_pii_type
            .values()
            .next()
            .map_or(0, PiiScore::effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, u32)]) -> BTreeMap<String, PiiScore> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), PiiScore::Single(*v)))
            .collect()
    }

    #[test]
    fn test_winner_is_max_score() {
        let pii = FeaturePii::from_scores("email", scores(&[("emails", 97), ("dates", 3)]));
        assert_eq!(pii.winning_category(), Some("emails"));
        assert_eq!(pii.winning_score(), 97);
        assert!(pii.is_pii);
    }

    #[test]
    fn test_below_threshold_not_pii() {
        let pii = FeaturePii::from_scores("misc", scores(&[("emails", 12)]));
        assert_eq!(pii.winning_score(), 12);
        assert!(!pii.is_pii);
    }

    #[test]
    fn test_threshold_is_strict() {
        let pii = FeaturePii::from_scores("edge", scores(&[("ssns", PII_THRESHOLD)]));
        assert!(!pii.is_pii);
        let pii = FeaturePii::from_scores("edge", scores(&[("ssns", PII_THRESHOLD + 1)]));
        assert!(pii.is_pii);
    }

    #[test]
    fn test_merged_score_serializes_nested() {
        let mut map = BTreeMap::new();
        map.insert(
            "dates".to_string(),
            PiiScore::Merged {
                pattern: 90,
                ner: 85,
            },
        );
        let pii = FeaturePii::from_scores("dob", map);
        let json = serde_json::to_value(&pii).unwrap();
        assert_eq!(
            json["pii_types_and_scores"]["dates"],
            serde_json::json!({"pattern": 90, "ner": 85})
        );
        // Winner flattens to the effective score.
        assert_eq!(json["most_likely_pii_type"]["dates"], 90);
    }

    #[test]
    fn test_empty_scores() {
        let pii = FeaturePii::from_scores("empty", BTreeMap::new());
        assert!(!pii.is_pii);
        assert!(pii.most_likely_pii_type.is_empty());
    }
}
