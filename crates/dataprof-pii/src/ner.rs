//! Named-entity recognition collaborator.
//!
//! The scorer consumes an [`EntityRecognizer`]; a hosted model sits behind
//! this trait in production. The shipped [`HeuristicRecognizer`] covers the
//! common cases with lexical rules so the engine works out of the box.

use std::sync::LazyLock;

use regex::Regex;

use crate::detectors::is_date;

/// One recognized entity: a text span and its category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// Recognizes entities in a single cell of text.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Labels that never count toward a PII score: ordinary numeric and
/// calendar content.
pub const EXCLUDED_LABELS: &[&str] = &["CARDINAL", "ORDINAL", "DATE", "TIME", "PERCENT", "MONEY"];

/// True when a label is tallied by the scorer.
pub fn label_counts(label: &str) -> bool {
    !EXCLUDED_LABELS.contains(&label)
}

static CAPITALIZED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    // Segments may be a bare capital: the "O" in O'Brien.
    Regex::new(r"^[A-Z][a-z]*(?:['-][A-Z][a-z]*)*$").expect("capitalized-name regex")
});

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+(\.\d+)?\s*(kg|g|lb|lbs|oz|km|mi|miles|m|cm|ft|in|l|ml|gal)$")
        .expect("quantity regex")
});

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+(st|nd|rd|th)$").expect("ordinal regex"));

const ORG_SUFFIXES: &[&str] = &[
    "inc", "llc", "corp", "ltd", "co", "company", "group", "corporation", "plc",
];

const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Rule-based recognizer used when no external model is wired in.
///
/// Capitalized alphabetic spans are labeled PERSON (ORG when an
/// organization suffix is present, GPE for state codes); numeric, date,
/// percent, money, and quantity content gets the matching excluded label.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRecognizer;

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if let Some(label) = scalar_label(trimmed) {
            return vec![Entity {
                text: trimmed.to_string(),
                label: label.to_string(),
            }];
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 4 {
            return Vec::new();
        }

        if US_STATE_CODES.contains(&trimmed) {
            return vec![Entity {
                text: trimmed.to_string(),
                label: "GPE".to_string(),
            }];
        }

        let has_org_suffix = tokens.iter().any(|t| {
            ORG_SUFFIXES.contains(&t.trim_matches(|c: char| c == '.' || c == ',')
                .to_lowercase()
                .as_str())
        });
        let all_capitalized = tokens.iter().all(|t| CAPITALIZED_NAME.is_match(t));

        if has_org_suffix {
            return vec![Entity {
                text: trimmed.to_string(),
                label: "ORG".to_string(),
            }];
        }
        if all_capitalized {
            return vec![Entity {
                text: trimmed.to_string(),
                label: "PERSON".to_string(),
            }];
        }

        Vec::new()
    }
}

fn scalar_label(text: &str) -> Option<&'static str> {
    if is_date(text) {
        return Some("DATE");
    }
    if text.ends_with('%') && text[..text.len() - 1].trim().parse::<f64>().is_ok() {
        return Some("PERCENT");
    }
    if let Some(stripped) = text.strip_prefix('$')
        && stripped.replace(',', "").parse::<f64>().is_ok()
    {
        return Some("MONEY");
    }
    if ORDINAL.is_match(text) {
        return Some("ORDINAL");
    }
    if QUANTITY.is_match(text) {
        return Some("QUANTITY");
    }
    if text.replace(',', "").parse::<f64>().is_ok() {
        return Some("CARDINAL");
    }
    None
}
