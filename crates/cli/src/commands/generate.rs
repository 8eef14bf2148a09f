//! `rulegen generate`

use anyhow::{Result, bail};
use colored::*;
use rulegen_codegen::{GenerationReport, Generator, GeneratorConfig};
use rulegen_ir::load_schema;

use crate::GenerateArgs;
use crate::config::apply_overrides;

/// Message printed after a successful run
pub const SUCCESS_MESSAGE: &str = "Request validation files generated successfully!";

/// Run generation with `args` applied over `config`.
pub fn run(config: GeneratorConfig, args: &GenerateArgs, quiet: bool) -> Result<()> {
    let config = apply_overrides(config, args)?;
    let generator = Generator::new(config);

    let report = match &args.schema {
        Some(path) => {
            let document = load_schema(path)?;
            generator.generate_from_schema(&document)?
        }
        None => generator.generate()?,
    };

    if !quiet {
        print_report(&report);
    }

    if !report.is_success() {
        bail!("{} migration(s) could not be processed", report.failures.len());
    }

    if !quiet {
        if report.dry_run {
            println!("{}", "Dry run complete, no files were written.".yellow());
        } else {
            println!("{}", SUCCESS_MESSAGE.green().bold());
        }
    }

    Ok(())
}

fn print_report(report: &GenerationReport) {
    for file in &report.files {
        let path = report.output_dir.join(&file.path);
        let label = if report.dry_run {
            "• Would write:".cyan()
        } else {
            "✓ Created:".green()
        };
        println!("  {} {} ({})", label, path.display(), file.table.dimmed());
    }

    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            "✗ Failed:".red(),
            failure.source,
            failure.error
        );
    }

    println!();
    print!("{}", report.summary());
}
