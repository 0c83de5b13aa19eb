//! Rule validation for tabular datasets.
//!
//! Columns carry named rule sets stored in an external key-value document
//! store ([`RuleStore`]). A [`ValidationRun`] filters the assignments to
//! the columns actually present, compiles each name to a [`CompiledRule`]
//! (built-ins first, stored user regexes second), then walks every cell
//! and records a [`dataprof_model::ValidationError`] per failing rule.
//!
//! Build or evaluation failures never surface to the caller: the run ends
//! in its `Failed` state with an empty violation list, and the failure is
//! logged.

pub mod error;
pub mod rule;
pub mod ruleset;
pub mod run;
pub mod store;

// === Evaluation ===
pub use run::{RunState, ValidationRun};

// === Rules ===
pub use rule::CompiledRule;
pub use ruleset::RuleSet;

// === Storage ===
pub use error::{Result, ValidateError};
pub use store::{
    JsonRuleStore, RuleStore, add_column_rules, load_regex, remove_column_rules, save_regex,
    stored_names,
};
