//! # rulegen CLI
//!
//! Command-line interface for rulegen.
//!
//! ## Commands
//!
//! - `generate` - Generate form requests from a migrations directory or schema file
//! - `inspect` - Show the table and rules extracted from one migration
//!

pub mod commands;
pub mod config;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rulegen_codegen::OutputFormat;
use std::path::PathBuf;

// Re-export dependencies for use in main.rs
pub use rulegen_codegen;
pub use rulegen_core;
pub use rulegen_ir;

/// Generate request-validation classes from schema-builder migrations.
#[derive(Debug, Parser)]
#[command(name = "rulegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./rulegen.toml when present).
    #[arg(short, long, global = true, env = "RULEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter directive implied by `-v` / `-q`
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate one form request per created table.
    Generate(GenerateArgs),

    /// Print the table and rule set extracted from one migration.
    Inspect {
        /// Migration file to inspect.
        file: PathBuf,

        /// Print the rule set as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Flags for `rulegen generate`. Anything left unset falls back to the
/// configuration file, then to built-in defaults.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Migrations directory [default: database/migrations].
    #[arg(short, long)]
    pub migrations: Option<PathBuf>,

    /// Output root [default: app/Http/Requests].
    #[arg(short, long, env = "RULEGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Read tables from a JSON schema document instead of migrations.
    #[arg(long, conflicts_with = "migrations")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Namespace prefix for generated classes.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Migration file extension.
    #[arg(long)]
    pub extension: Option<String>,

    /// Additional table to skip (repeatable).
    #[arg(long = "skip-table", value_name = "TABLE")]
    pub skip_tables: Vec<String>,

    /// Additional column to skip (repeatable).
    #[arg(long = "skip-column", value_name = "COLUMN")]
    pub skip_columns: Vec<String>,

    /// Keep columns whose type has no base rule.
    #[arg(long)]
    pub keep_unmapped: bool,

    /// Record per-file failures and keep going.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Overwrite outputs in place instead of via temp file and rename.
    #[arg(long)]
    pub no_atomic: bool,

    /// Render and report without writing files.
    #[arg(long)]
    pub dry_run: bool,
}

/// Output formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Php,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Php => OutputFormat::Php,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(config, &args, cli.quiet),
        Commands::Inspect { file, json } => commands::inspect::run(&config, &file, json),
    }
}
