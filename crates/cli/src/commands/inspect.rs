//! `rulegen inspect`

use anyhow::{Context, Result};
use colored::*;
use rulegen_codegen::{GeneratorConfig, RequestContext, build_rule_set};
use rulegen_ir::{Extraction, TableSpec, extract_table};
use std::path::Path;

/// Print what extraction and rule mapping produce for one migration.
pub fn run(config: &GeneratorConfig, file: &Path, json: bool) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read migration '{}'", file.display()))?;

    let table = match extract_table(&source, &config.skip) {
        Extraction::Table(table) => table,
        Extraction::NoCreateStatement => {
            println!("{}", "No create-table statement found.".yellow());
            return Ok(());
        }
        Extraction::SkippedTable(name) => {
            println!("Table {} is skip-listed.", name.yellow());
            return Ok(());
        }
    };

    let rules = build_rule_set(&table, config.drop_unmapped);

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    print_table(&table);
    println!();
    println!(
        "{} {}",
        "Rules".cyan().bold(),
        format!("({})", RequestContext::request_class_name(&table.name)).dimmed()
    );
    for (column, tokens) in rules.entries() {
        let tokens: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        println!("  {} => {}", column, tokens.join("|"));
    }

    Ok(())
}

fn print_table(table: &TableSpec) {
    println!("{} {}", "Table".cyan().bold(), table.name.bold());

    for column in table.columns() {
        let mut flags = Vec::new();
        if let Some(length) = column.effective_length() {
            flags.push(format!("length={}", length));
        }
        if column.nullable {
            flags.push("nullable".to_string());
        }
        if column.unique {
            flags.push("unique".to_string());
        }
        if let Some(foreign) = &column.foreign_ref {
            match &foreign.column {
                Some(target) => flags.push(format!("foreign={}.{}", foreign.table, target)),
                None => flags.push(format!("foreign={}", foreign.table)),
            }
        }

        let column_type = if column.column_type.is_unknown() {
            column.column_type.to_string().yellow()
        } else {
            column.column_type.to_string().normal()
        };
        println!("  {:<24} {} {}", column.name, column_type, flags.join(" ").dimmed());
    }
}
