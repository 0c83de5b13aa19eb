//! Compiled validation rules.
//!
//! A rule is either one of the fixed built-ins or a stored regex fetched
//! from the rule store. Rules are resolved by name at schema-build time and
//! compiled once per run.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ValidateError};

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric regex"));

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric regex"));

/// Built-in rule names, as they appear in stored rule sets.
pub const BUILTIN_NON_EMPTY: &str = "Non Empty";
pub const BUILTIN_ALPHANUMERIC: &str = "Alphanumeric Only";
pub const BUILTIN_NUMERIC: &str = "Numeric Only";
/// Prefix of the parameterized exact-length rule, e.g. "Exact Length 9".
pub const BUILTIN_EXACT_LENGTH_PREFIX: &str = "Exact Length ";

/// A rule compiled and ready to evaluate against cell values.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    message: String,
    kind: RuleKind,
}

#[derive(Debug, Clone)]
enum RuleKind {
    NonEmpty,
    Alphanumeric,
    Numeric,
    ExactLength(usize),
    Pattern(Regex),
}

impl CompiledRule {
    /// Resolve a built-in rule by name, if the name is one.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            BUILTIN_NON_EMPTY => Some(Self {
                name: name.to_string(),
                message: "value must not be empty (Non Empty)".to_string(),
                kind: RuleKind::NonEmpty,
            }),
            BUILTIN_ALPHANUMERIC => Some(Self {
                name: name.to_string(),
                message: "value must be alphanumeric (Alphanumeric Only)".to_string(),
                kind: RuleKind::Alphanumeric,
            }),
            BUILTIN_NUMERIC => Some(Self {
                name: name.to_string(),
                message: "value must contain digits only (Numeric Only)".to_string(),
                kind: RuleKind::Numeric,
            }),
            _ => {
                let length: usize = name.strip_prefix(BUILTIN_EXACT_LENGTH_PREFIX)?.parse().ok()?;
                Some(Self {
                    name: name.to_string(),
                    message: format!("value must be exactly {length} digit(s) (Exact Length {length})"),
                    kind: RuleKind::ExactLength(length),
                })
            }
        }
    }

    /// Compile a user-submitted regex rule.
    pub fn from_pattern(name: &str, pattern: &str, description: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ValidateError::InvalidRegex {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        let message = if description.trim().is_empty() {
            format!("value does not match pattern ({name})")
        } else {
            format!("{description} ({name})")
        };
        Ok(Self {
            name: name.to_string(),
            message,
            kind: RuleKind::Pattern(regex),
        })
    }

    /// Rule name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Violation message referencing the failed pattern.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the value satisfies the rule.
    pub fn accepts(&self, value: &str) -> bool {
        match &self.kind {
            RuleKind::NonEmpty => !value.trim().is_empty(),
            RuleKind::Alphanumeric => ALPHANUMERIC.is_match(value),
            RuleKind::Numeric => NUMERIC.is_match(value),
            RuleKind::ExactLength(n) => value.len() == *n && NUMERIC.is_match(value),
            RuleKind::Pattern(regex) => regex.is_match(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        let rule = CompiledRule::builtin(BUILTIN_NON_EMPTY).unwrap();
        assert!(rule.accepts("x"));
        assert!(!rule.accepts(""));
        assert!(!rule.accepts("   "));
    }

    #[test]
    fn test_alphanumeric() {
        let rule = CompiledRule::builtin(BUILTIN_ALPHANUMERIC).unwrap();
        assert!(rule.accepts("abc123"));
        assert!(!rule.accepts("abc-123"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn test_numeric() {
        let rule = CompiledRule::builtin(BUILTIN_NUMERIC).unwrap();
        assert!(rule.accepts("12345"));
        assert!(!rule.accepts("12a"));
        assert!(!rule.accepts(""));
        assert!(rule.message().contains("Numeric Only"));
    }

    #[test]
    fn test_exact_length() {
        let rule = CompiledRule::builtin("Exact Length 5").unwrap();
        assert!(rule.accepts("70116"));
        assert!(!rule.accepts("7011"));
        assert!(!rule.accepts("7011a"));
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(CompiledRule::builtin("Exact Length x").is_none());
        assert!(CompiledRule::builtin("Something Else").is_none());
    }

    #[test]
    fn test_custom_pattern() {
        let rule =
            CompiledRule::from_pattern("State Code", r"^[A-Z]{2}$", "two-letter state").unwrap();
        assert!(rule.accepts("LA"));
        assert!(!rule.accepts("Louisiana"));
        assert!(rule.message().contains("State Code"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = CompiledRule::from_pattern("Broken", r"[unclosed", "");
        assert!(matches!(result, Err(ValidateError::InvalidRegex { .. })));
    }
}
