//! Validation run: schema construction and row-level evaluation.

use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, warn};

use dataprof_model::{ValidationError, any_to_json, any_to_string};

use crate::error::{Result, ValidateError};
use crate::rule::CompiledRule;
use crate::ruleset::RuleSet;
use crate::store::{RuleStore, load_regex};

/// State of one validation run.
///
/// Any failure while filtering, building, or evaluating moves the run to
/// `Failed`; the failure is logged and swallowed, never raised to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ColumnsFiltered,
    SchemaBuilt,
    Validated,
    Persisted,
    Failed,
}

/// One column of the compiled schema.
struct SchemaColumn {
    column: String,
    rules: Vec<CompiledRule>,
}

/// A single validation run over one loaded table.
pub struct ValidationRun<'a> {
    store: &'a dyn RuleStore,
    table: String,
    state: RunState,
}

impl<'a> ValidationRun<'a> {
    /// Start an idle run against a rule store, for the named dataset.
    pub fn new(store: &'a dyn RuleStore, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            state: RunState::Idle,
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Validate the table against the rule set.
    ///
    /// Returns the accumulated violations; on any internal failure the run
    /// ends `Failed` and the result is empty.
    pub fn execute(&mut self, df: &DataFrame, rules: &RuleSet) -> Vec<ValidationError> {
        match self.try_execute(df, rules) {
            Ok(errors) => {
                self.state = RunState::Validated;
                debug!(table = %self.table, violations = errors.len(), "validation complete");
                errors
            }
            Err(error) => {
                warn!(table = %self.table, %error, "validation run failed");
                self.state = RunState::Failed;
                Vec::new()
            }
        }
    }

    /// Record that the error artifact has been written.
    pub fn mark_persisted(&mut self) {
        if self.state == RunState::Validated {
            self.state = RunState::Persisted;
        }
    }

    fn try_execute(&mut self, df: &DataFrame, rules: &RuleSet) -> Result<Vec<ValidationError>> {
        let applicable = rules.filter_to_columns(df);
        self.state = RunState::ColumnsFiltered;

        let schema = self.build_schema(&applicable)?;
        self.state = RunState::SchemaBuilt;

        self.evaluate(df, &schema)
    }

    /// Resolve every rule name to a compiled rule: built-ins first, then
    /// the stored regexes for this dataset.
    fn build_schema(&self, rules: &RuleSet) -> Result<Vec<SchemaColumn>> {
        let mut schema = Vec::new();
        for (column, names) in rules.iter() {
            let mut compiled = Vec::new();
            for name in names {
                if let Some(rule) = CompiledRule::builtin(name) {
                    compiled.push(rule);
                } else if let Some((pattern, description)) =
                    load_regex(self.store, &self.table, name)?
                {
                    compiled.push(CompiledRule::from_pattern(name, &pattern, &description)?);
                } else {
                    return Err(ValidateError::UnknownRule {
                        name: name.clone(),
                        column: column.clone(),
                    });
                }
            }
            schema.push(SchemaColumn {
                column: column.clone(),
                rules: compiled,
            });
        }
        Ok(schema)
    }

    /// Walk every applicable column and row; each non-accepting rule
    /// yields one violation keyed back to the table's first column.
    fn evaluate(&self, df: &DataFrame, schema: &[SchemaColumn]) -> Result<Vec<ValidationError>> {
        let mut violations = Vec::new();
        let key_column = df.get_columns().first();

        for entry in schema {
            let series = df
                .column(&entry.column)
                .map_err(|_| ValidateError::ColumnAccess {
                    column: entry.column.clone(),
                })?;

            for row in 0..df.height() {
                let cell = series.get(row).unwrap_or(AnyValue::Null);
                let text = any_to_string(cell.clone());

                for rule in &entry.rules {
                    if rule.accepts(&text) {
                        continue;
                    }
                    let mut violation = ValidationError::at_row(
                        &entry.column,
                        row,
                        rule.message(),
                        any_to_json(cell.clone()),
                    );
                    if let Some(key) = key_column {
                        let key_value = key.get(row).unwrap_or(AnyValue::Null);
                        violation = violation
                            .with_impacted_key(key.name().to_string(), any_to_json(key_value));
                    }
                    violations.push(violation);
                }
            }
        }
        Ok(violations)
    }
}
