//! # Generator Orchestrator
//!
//! The `Generator` is the top-level entry point. It walks the migrations
//! directory (or a structured schema document), runs each source through the
//! extraction and rule-mapping pipeline, renders the result and writes it
//! below the output root.
//!
//! ## Pipeline
//!
//! ```text
//! MigrationLocator::files()
//!         │
//!         ▼
//!   read source ──► extract_table() ──► Extraction
//!                                          │
//!                  ┌───────────────────────┼─────────────────────┐
//!                  ▼                       ▼                     ▼
//!        NoCreateStatement          SkippedTable            Table(spec)
//!          (skipped)                 (skipped)                  │
//!                                                               ▼
//!                                             RequestContext ──► emit::render()
//!                                                               │
//!                                                               ▼
//!                                                write_file() (unless dry run)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rulegen_codegen::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new().with_migrations_dir("database/migrations");
//! let report = Generator::new(config).generate()?;
//!
//! println!("{}", report.summary());
//! ```

use rulegen_core::{ResultExt, RulegenError, RulegenResult, Validatable};
use rulegen_ir::{Extraction, MigrationLocator, SchemaDocument, TableSpec, extract_table};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::emit;
use crate::writer::write_file;
use crate::{ErrorPolicy, GeneratedFile, GeneratorConfig, OutputFormat};

// ============================================================================
// Report types
// ============================================================================

/// Why a source produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source has no create-table construct
    NoCreateStatement,
    /// The created table is skip-listed
    SkippedTable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoCreateStatement => write!(f, "no create-table statement"),
            SkipReason::SkippedTable(table) => write!(f, "table '{}' is skip-listed", table),
        }
    }
}

/// A source that was looked at but produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    /// Migration path, or table name for schema documents
    pub source: String,
    pub reason: SkipReason,
}

/// A source that failed under [`ErrorPolicy::Continue`]
#[derive(Debug)]
pub struct FileFailure {
    /// Migration path, or table name for schema documents
    pub source: String,
    pub error: RulegenError,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Rendered files, in processing order
    pub files: Vec<GeneratedFile>,

    /// Full paths actually written (empty in a dry run)
    pub written: Vec<PathBuf>,

    /// Sources that produced no output
    pub skipped: Vec<SkippedSource>,

    /// Per-source failures recorded under the continue policy
    pub failures: Vec<FileFailure>,

    /// Output root the files were written to
    pub output_dir: PathBuf,

    /// Output rendering used
    pub format: OutputFormat,

    /// Whether writing was suppressed
    pub dry_run: bool,
}

impl GenerationReport {
    fn new(config: &GeneratorConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            format: config.format,
            dry_run: config.dry_run,
            ..Self::default()
        }
    }

    /// Number of rendered files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// True when no source failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Rendered file for a table, if any
    pub fn file_for_table(&self, table: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.table == table)
    }

    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary::from_report(self)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Top-level generator that orchestrates the full pipeline.
///
/// The `Generator` is stateless aside from its configuration; sources are
/// processed sequentially and independently.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // ====================================================================
    // Planning (no I/O)
    // ====================================================================

    /// Render the file for one extracted table.
    ///
    /// Names that are not plain identifiers are reported but still rendered;
    /// quoting keeps the output well-formed.
    pub fn plan_table(&self, table: &TableSpec) -> RulegenResult<GeneratedFile> {
        if let Err(e) = table.validate() {
            warn!(table = %table.name, "{}", e);
        }

        let ctx = RequestContext::from_table(table, &self.config);
        emit::render(&ctx).with_context(format!("Rendering request for table '{}'", table.name))
    }

    /// Run one migration source through extraction and rendering.
    ///
    /// Returns `Ok(None)` when the source yields no output (no create
    /// statement, or a skip-listed table).
    pub fn plan_source(&self, path: &Path, source: &str) -> RulegenResult<Option<GeneratedFile>> {
        match self.classify(source) {
            Ok(table) => self.plan_table(&table).map(Some),
            Err(reason) => {
                debug!(path = %path.display(), %reason, "skipping migration");
                Ok(None)
            }
        }
    }

    fn classify(&self, source: &str) -> Result<TableSpec, SkipReason> {
        match extract_table(source, &self.config.skip) {
            Extraction::Table(table) => Ok(table),
            Extraction::NoCreateStatement => Err(SkipReason::NoCreateStatement),
            Extraction::SkippedTable(name) => Err(SkipReason::SkippedTable(name)),
        }
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Process every migration in the configured directory.
    ///
    /// # Errors
    ///
    /// A missing migrations directory is always fatal. Read, render and write
    /// failures abort the run under [`ErrorPolicy::Abort`]; under
    /// [`ErrorPolicy::Continue`] they are recorded in the report instead.
    pub fn generate(&self) -> RulegenResult<GenerationReport> {
        let locator = MigrationLocator::new(&self.config.migrations_dir)
            .with_extension(&self.config.extension);
        let mut report = GenerationReport::new(&self.config);
        let mut seen = HashSet::new();

        for entry in locator.files()? {
            let path = match entry {
                Ok(path) => path,
                Err(error) => {
                    let source = self.config.migrations_dir.display().to_string();
                    self.record_failure(&mut report, source, error)?;
                    continue;
                }
            };

            if let Err(error) = self.process_file(&path, &mut report, &mut seen) {
                self.record_failure(&mut report, path.display().to_string(), error)?;
            }
        }

        self.finish(&report);
        Ok(report)
    }

    /// Process the tables of a structured schema document.
    pub fn generate_from_schema(&self, document: &SchemaDocument) -> RulegenResult<GenerationReport> {
        let mut report = GenerationReport::new(&self.config);
        let mut seen = HashSet::new();

        for extraction in document.extractions(&self.config.skip) {
            let table = match extraction {
                Extraction::Table(table) => table,
                Extraction::SkippedTable(name) => {
                    debug!(table = %name, "skipping table");
                    report.skipped.push(SkippedSource {
                        source: name.clone(),
                        reason: SkipReason::SkippedTable(name),
                    });
                    continue;
                }
                Extraction::NoCreateStatement => continue,
            };

            let outcome = self
                .plan_table(&table)
                .and_then(|file| self.emit(file, &mut report, &mut seen));
            if let Err(error) = outcome {
                self.record_failure(&mut report, table.name.clone(), error)?;
            }
        }

        self.finish(&report);
        Ok(report)
    }

    fn process_file(
        &self,
        path: &Path,
        report: &mut GenerationReport,
        seen: &mut HashSet<PathBuf>,
    ) -> RulegenResult<()> {
        let source = std::fs::read_to_string(path).map_err(|e| RulegenError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match self.classify(&source) {
            Ok(table) => {
                debug!(
                    path = %path.display(),
                    table = %table.name,
                    columns = table.column_count(),
                    "table extracted",
                );
                let file = self.plan_table(&table)?;
                self.emit(file, report, seen)
            }
            Err(reason) => {
                debug!(path = %path.display(), %reason, "skipping migration");
                report.skipped.push(SkippedSource {
                    source: path.display().to_string(),
                    reason,
                });
                Ok(())
            }
        }
    }

    fn emit(
        &self,
        file: GeneratedFile,
        report: &mut GenerationReport,
        seen: &mut HashSet<PathBuf>,
    ) -> RulegenResult<()> {
        if !seen.insert(file.path.clone()) {
            warn!(
                path = %file.path.display(),
                table = %file.table,
                "output path produced by an earlier table, overwriting",
            );
        }

        if self.config.dry_run {
            info!(path = %file.path.display(), table = %file.table, "dry run, not writing");
        } else {
            let full_path = write_file(&self.config.output_dir, &file, self.config.atomic_writes)?;
            info!(path = %full_path.display(), table = %file.table, "request written");
            report.written.push(full_path);
        }

        report.files.push(file);
        Ok(())
    }

    fn record_failure(
        &self,
        report: &mut GenerationReport,
        source: String,
        error: RulegenError,
    ) -> RulegenResult<()> {
        match self.config.on_error {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Continue => {
                warn!(source = %source, error = %error, "failed to process source, continuing");
                report.failures.push(FileFailure { source, error });
                Ok(())
            }
        }
    }

    fn finish(&self, report: &GenerationReport) {
        info!(
            files = report.file_count(),
            skipped = report.skipped.len(),
            failures = report.failures.len(),
            dry_run = report.dry_run,
            "code generation complete",
        );
    }
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Output root
    pub output_dir: PathBuf,
    /// Output rendering
    pub format: OutputFormat,
    /// Number of rendered request files
    pub total_files: usize,
    /// Sources without a create statement
    pub no_create: usize,
    /// Skip-listed tables
    pub skipped_tables: usize,
    /// Failed sources
    pub failures: usize,
    /// Total bytes of generated content
    pub total_bytes: usize,
    /// Whether writing was suppressed
    pub dry_run: bool,
}

impl GenerationSummary {
    /// Build a summary from a generation report.
    pub fn from_report(report: &GenerationReport) -> Self {
        let skipped_tables = report
            .skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::SkippedTable(_)))
            .count();

        Self {
            output_dir: report.output_dir.clone(),
            format: report.format,
            total_files: report.file_count(),
            no_create: report.skipped.len() - skipped_tables,
            skipped_tables,
            failures: report.failures.len(),
            total_bytes: report.files.iter().map(|f| f.content.len()).sum(),
            dry_run: report.dry_run,
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        let title = if self.dry_run {
            "Dry Run Complete (nothing written)"
        } else {
            "Request Generation Complete"
        };

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str(&format!("║  {:<48}║\n", title));
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!(
            "║  Output:      {:<35}║\n",
            self.output_dir.display().to_string()
        ));
        out.push_str(&format!("║  Format:      {:<35}║\n", self.format.to_string()));
        out.push_str(&format!("║  Requests:    {:<35}║\n", self.total_files));
        out.push_str(&format!("║  Skipped:     {:<35}║\n", self.skipped_tables));
        out.push_str(&format!("║  No create:   {:<35}║\n", self.no_create));
        out.push_str(&format!("║  Failures:    {:<35}║\n", self.failures));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GenerationReport`].
pub fn summarize(report: &GenerationReport) -> GenerationSummary {
    GenerationSummary::from_report(report)
}

// ============================================================================
// Tests
// ============================================================================
