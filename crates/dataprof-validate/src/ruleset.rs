//! Per-column rule-name assignments for one dataset.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::store::{RuleStore, stored_names};

/// Rule names keyed by column, sorted for stable evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    columns: BTreeMap<String, Vec<String>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every stored rule assignment for the named dataset.
    pub fn from_store(store: &dyn RuleStore, table: &str) -> Result<Self> {
        let mut set = Self::new();
        for column in store.keys(crate::store::RULES_COLLECTION, table)? {
            let names = stored_names(store, table, &column)?;
            set.columns.insert(column, names.into_iter().collect());
        }
        Ok(set)
    }

    /// Assign rule names to a column, appending to any existing list.
    pub fn add<I, S>(&mut self, column: impl Into<String>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.columns.entry(column.into()).or_default();
        for name in names {
            let name = name.into();
            if !entry.contains(&name) {
                entry.push(name);
            }
        }
    }

    /// Keep only the columns present in the given table.
    pub fn filter_to_columns(&self, df: &DataFrame) -> Self {
        let present: Vec<&str> = df
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect();
        Self {
            columns: self
                .columns
                .iter()
                .filter(|(column, _)| present.contains(&column.as_str()))
                .map(|(column, names)| (column.clone(), names.clone()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.columns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonRuleStore, add_column_rules};
    use polars::prelude::df;
    use tempfile::tempdir;

    #[test]
    fn test_add_deduplicates() {
        let mut set = RuleSet::new();
        set.add("zip", ["Numeric Only", "Numeric Only", "Non Empty"]);
        let names: Vec<_> = set.iter().next().unwrap().1.clone();
        assert_eq!(names, vec!["Numeric Only", "Non Empty"]);
    }

    #[test]
    fn test_filter_to_columns() {
        let mut set = RuleSet::new();
        set.add("zip", ["Numeric Only"]);
        set.add("gone", ["Non Empty"]);
        let frame = df! { "zip" => &["70116"] }.unwrap();
        let filtered = set.filter_to_columns(&frame);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|(c, _)| c == "zip"));
    }

    #[test]
    fn test_from_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonRuleStore::new(dir.path().join("rules.json"));
        add_column_rules(&store, "t", "zip", &["Numeric Only".into()]).unwrap();
        add_column_rules(&store, "t", "name", &["Non Empty".into()]).unwrap();

        let set = RuleSet::from_store(&store, "t").unwrap();
        assert_eq!(set.len(), 2);

        let other = RuleSet::from_store(&store, "other_table").unwrap();
        assert!(other.is_empty());
    }
}
