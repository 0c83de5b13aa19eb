//! Command handlers bridging CLI arguments to the pipeline.

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::warn;

use dataprof_validate::{
    CompiledRule, JsonRuleStore, RuleSet, add_column_rules, load_regex, remove_column_rules,
    save_regex,
};

use crate::cli::{ProfileArgs, RuleEditArgs, RuleListArgs};
use dataprof_cli::pipeline::{ProfileOutcome, ProfileRequest, run_profile};
use crate::summary::{apply_table_style, header_cell};

pub fn run_profile_command(args: &ProfileArgs) -> Result<ProfileOutcome> {
    let request = ProfileRequest {
        file: args.file.clone(),
        title: args.title.clone(),
        id_column: args.id_column.clone(),
        label_column: args.label_column.clone(),
        uploaded: args.uploaded,
        data_root: args.data_root.clone(),
        upload_root: args.upload_root.clone(),
        rule_store: args.rule_store.clone(),
    };
    run_profile(&request)
}

pub fn run_rules_add(args: &RuleEditArgs) -> Result<()> {
    let store = JsonRuleStore::new(&args.rule_store);

    if let Some(pattern) = &args.pattern {
        if args.names.len() != 1 {
            bail!("--pattern stores a regex under exactly one rule name");
        }
        let name = &args.names[0];
        let description = args.description.as_deref().unwrap_or(name);
        // Reject unusable patterns before they reach a validation run.
        CompiledRule::from_pattern(name, pattern, description)?;
        save_regex(&store, &args.table, name, pattern, description)
            .context("store regex rule")?;
    }

    for name in &args.names {
        if CompiledRule::builtin(name).is_none()
            && load_regex(&store, &args.table, name)?.is_none()
        {
            warn!(rule = %name, "not a built-in and no stored regex; validation runs using it will fail");
        }
    }

    add_column_rules(&store, &args.table, &args.column, &args.names)
        .context("store rule assignments")?;
    println!(
        "{} rule(s) assigned to {}.{}",
        args.names.len(),
        args.table,
        args.column
    );
    Ok(())
}

pub fn run_rules_remove(args: &RuleEditArgs) -> Result<()> {
    let store = JsonRuleStore::new(&args.rule_store);
    remove_column_rules(&store, &args.table, &args.column, &args.names)
        .context("update rule assignments")?;
    println!(
        "{} rule(s) unassigned from {}.{}",
        args.names.len(),
        args.table,
        args.column
    );
    Ok(())
}

pub fn run_rules_list(args: &RuleListArgs) -> Result<()> {
    let store = JsonRuleStore::new(&args.rule_store);
    let rules = RuleSet::from_store(&store, &args.table)?;
    if rules.is_empty() {
        println!("no rules stored for {}", args.table);
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Rules")]);
    apply_table_style(&mut table);
    for (column, names) in rules.iter() {
        table.add_row(vec![column.clone(), names.join(", ")]);
    }
    println!("{table}");
    Ok(())
}
