//! Rule storage collaborator.
//!
//! Named rule sets and user regexes live in an external key-value document
//! store with two collections, "rules" and "regexes", addressed by
//! (table, key). [`JsonRuleStore`] is the shipped file-backed
//! implementation; a hosted store plugs in behind the same trait.
//! Writes are best-effort last-write-wins.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use crate::error::{Result, ValidateError};

/// Collection holding per-column rule-name sets.
pub const RULES_COLLECTION: &str = "rules";
/// Collection holding named user regexes.
pub const REGEXES_COLLECTION: &str = "regexes";

/// Key-value document store for validation rules and regexes.
pub trait RuleStore: Send + Sync {
    /// Read the document at (collection, table, key).
    fn get(&self, collection: &str, table: &str, key: &str) -> Result<Option<Value>>;

    /// Write the document at (collection, table, key), replacing any
    /// previous value.
    fn set(&self, collection: &str, table: &str, key: &str, value: Value) -> Result<()>;

    /// Remove the document at (collection, table, key).
    fn remove(&self, collection: &str, table: &str, key: &str) -> Result<()>;

    /// List the keys stored under (collection, table), in sorted order.
    fn keys(&self, collection: &str, table: &str) -> Result<Vec<String>>;
}

/// Adds rule names to a column's stored set (set union with whatever
/// already exists for that key).
pub fn add_column_rules(
    store: &dyn RuleStore,
    table: &str,
    column: &str,
    names: &[String],
) -> Result<()> {
    let mut current = stored_names(store, table, column)?;
    current.extend(names.iter().cloned());
    store.set(
        RULES_COLLECTION,
        table,
        column,
        Value::Array(current.into_iter().map(Value::String).collect()),
    )
}

/// Removes rule names from a column's stored set (set difference).
pub fn remove_column_rules(
    store: &dyn RuleStore,
    table: &str,
    column: &str,
    names: &[String],
) -> Result<()> {
    let mut current = stored_names(store, table, column)?;
    for name in names {
        current.remove(name);
    }
    if current.is_empty() {
        store.remove(RULES_COLLECTION, table, column)
    } else {
        store.set(
            RULES_COLLECTION,
            table,
            column,
            Value::Array(current.into_iter().map(Value::String).collect()),
        )
    }
}

/// Reads the stored rule names for one column.
pub fn stored_names(
    store: &dyn RuleStore,
    table: &str,
    column: &str,
) -> Result<BTreeSet<String>> {
    let names = match store.get(RULES_COLLECTION, table, column)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => BTreeSet::new(),
    };
    Ok(names)
}

/// Stores a named user regex with its description.
pub fn save_regex(
    store: &dyn RuleStore,
    table: &str,
    name: &str,
    pattern: &str,
    description: &str,
) -> Result<()> {
    store.set(
        REGEXES_COLLECTION,
        table,
        name,
        json!({"pattern": pattern, "description": description}),
    )
}

/// Fetches a stored regex as (pattern, description).
pub fn load_regex(
    store: &dyn RuleStore,
    table: &str,
    name: &str,
) -> Result<Option<(String, String)>> {
    match store.get(REGEXES_COLLECTION, table, name)? {
        None => Ok(None),
        Some(value) => {
            let pattern = value
                .get("pattern")
                .and_then(Value::as_str)
                .ok_or_else(|| ValidateError::MalformedRegexEntry {
                    name: name.to_string(),
                })?
                .to_string();
            let description = value
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Ok(Some((pattern, description)))
        }
    }
}

/// File-backed rule store: one JSON document of
/// `{collection: {table: {key: value}}}`.
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    path: PathBuf,
}

impl JsonRuleStore {
    /// Open (or lazily create) a store at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Value> {
        if !self.path.exists() {
            return Ok(json!({}));
        }
        let text = fs::read_to_string(&self.path).map_err(|e| ValidateError::StoreIo {
            operation: "read",
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ValidateError::StoreFormat {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_all(&self, value: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ValidateError::StoreIo {
                operation: "create directory for",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let text = serde_json::to_string_pretty(value).map_err(|e| ValidateError::StoreFormat {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, text).map_err(|e| ValidateError::StoreIo {
            operation: "write",
            path: self.path.clone(),
            source: e,
        })
    }
}

impl RuleStore for JsonRuleStore {
    fn get(&self, collection: &str, table: &str, key: &str) -> Result<Option<Value>> {
        let all = self.read_all()?;
        Ok(all
            .get(collection)
            .and_then(|c| c.get(table))
            .and_then(|t| t.get(key))
            .cloned())
    }

    fn set(&self, collection: &str, table: &str, key: &str, value: Value) -> Result<()> {
        let mut all = self.read_all()?;
        let root = all.as_object_mut().ok_or_else(|| malformed(&self.path))?;
        let coll = root
            .entry(collection)
            .or_insert_with(|| Value::Object(Map::new()));
        let tbl = coll
            .as_object_mut()
            .ok_or_else(|| malformed(&self.path))?
            .entry(table)
            .or_insert_with(|| Value::Object(Map::new()));
        tbl.as_object_mut()
            .ok_or_else(|| malformed(&self.path))?
            .insert(key.to_string(), value);
        self.write_all(&all)
    }

    fn remove(&self, collection: &str, table: &str, key: &str) -> Result<()> {
        let mut all = self.read_all()?;
        if let Some(tbl) = all
            .get_mut(collection)
            .and_then(|c| c.get_mut(table))
            .and_then(Value::as_object_mut)
        {
            tbl.remove(key);
        }
        self.write_all(&all)
    }

    fn keys(&self, collection: &str, table: &str) -> Result<Vec<String>> {
        let all = self.read_all()?;
        let keys = all
            .get(collection)
            .and_then(|c| c.get(table))
            .and_then(Value::as_object)
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        Ok(keys)
    }
}

fn malformed(path: &Path) -> ValidateError {
    ValidateError::StoreFormat {
        path: path.to_path_buf(),
        source: serde_json::Error::io(std::io::Error::other("collection is not an object")),
    }
}
