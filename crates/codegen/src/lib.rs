//! # rulegen Codegen
//!
//! Turns extracted tables into form-request validation classes.
//!
//! This crate maps each [`TableSpec`](rulegen_ir::TableSpec) to an ordered
//! rule set, renders it through an output emitter and writes the result under
//! the configured output root.
//!
//! ## Features
//!
//! - **Rule Mapping**: column types and modifiers to ordered rule tokens
//! - **PHP Emission**: form-request classes with `authorize()` and `rules()`
//! - **JSON Emission**: machine-readable rule sets
//! - **Atomic Writes**: temp file plus rename, never a half-written output
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod emit;
pub mod generator;
pub mod rules;
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::RequestContext;
pub use generator::{
    FileFailure, GenerationReport, GenerationSummary, Generator, SkipReason, SkippedSource,
    summarize,
};
pub use rules::{RuleSet, assemble_rules, base_rules, build_rule_set};
pub use writer::write_file;

use rulegen_core::{RulegenError, RulegenResult, Validatable, is_valid_identifier};
use rulegen_ir::SkipLists;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Namespace prefix of generated PHP classes
pub const DEFAULT_NAMESPACE: &str = "App\\Http\\Requests";

/// Default directory scanned for migrations
pub const DEFAULT_MIGRATIONS_DIR: &str = "database/migrations";

/// Default root for generated files
pub const DEFAULT_OUTPUT_DIR: &str = "app/Http/Requests";

// ============================================================================
// OutputFormat
// ============================================================================

/// Rendering target for generated rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PHP form-request class
    #[default]
    Php,
    /// JSON document with class, table and rules
    Json,
}

impl OutputFormat {
    pub fn file_type(self) -> FileType {
        match self {
            OutputFormat::Php => FileType::Php,
            OutputFormat::Json => FileType::Json,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Php => write!(f, "php"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "php" => Ok(OutputFormat::Php),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

// ============================================================================
// ErrorPolicy
// ============================================================================

/// What to do when a single migration cannot be read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run at the first failure
    #[default]
    Abort,
    /// Record the failure and move on to the next file
    Continue,
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the generator
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory scanned for migration sources
    pub migrations_dir: PathBuf,

    /// Root directory for generated files
    pub output_dir: PathBuf,

    /// Extension of migration sources (without the dot)
    pub extension: String,

    /// Output rendering
    pub format: OutputFormat,

    /// Namespace prefix for generated PHP classes
    pub namespace: String,

    /// Tables and columns excluded from generation
    pub skip: SkipLists,

    /// Omit columns whose type has no base rule
    pub drop_unmapped: bool,

    /// Write through a temp file and rename into place
    pub atomic_writes: bool,

    /// Per-file failure handling
    pub on_error: ErrorPolicy,

    /// Render and report without touching the filesystem
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: rulegen_ir::DEFAULT_EXTENSION.to_string(),
            format: OutputFormat::Php,
            namespace: DEFAULT_NAMESPACE.to_string(),
            skip: SkipLists::default(),
            drop_unmapped: true,
            atomic_writes: true,
            on_error: ErrorPolicy::Abort,
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migrations directory
    pub fn with_migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the namespace prefix (surrounding backslashes are dropped)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into().trim_matches('\\').to_string();
        self
    }

    pub fn with_skip(mut self, skip: SkipLists) -> Self {
        self.skip = skip;
        self
    }

    /// Keep columns of unmapped types (they still get required/unique/exists)
    pub fn keep_unmapped(mut self) -> Self {
        self.drop_unmapped = false;
        self
    }

    /// Overwrite outputs in place instead of renaming a temp file
    pub fn without_atomic_writes(mut self) -> Self {
        self.atomic_writes = false;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Enable dry-run mode
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Apply the builder normalisations to values read from a file:
    /// surrounding backslashes off the namespace, leading dot off the
    /// extension.
    pub fn normalized(mut self) -> Self {
        self.namespace = self.namespace.trim_matches('\\').to_string();
        self.extension = self.extension.trim_start_matches('.').to_string();
        self
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> RulegenResult<()> {
        if !self.namespace.is_empty() {
            if let Some(segment) = self
                .namespace
                .split('\\')
                .find(|segment| !is_valid_identifier(segment))
            {
                return Err(RulegenError::config(format!(
                    "namespace '{}' has invalid segment '{}'",
                    self.namespace, segment
                )));
            }
        }

        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(RulegenError::config(format!(
                "extension '{}' must be a bare file extension",
                self.extension
            )));
        }

        Ok(())
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// File type for categorization
    pub file_type: FileType,

    /// Table this file was generated for
    pub table: String,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        file_type: FileType,
        table: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
            table: table.into(),
        }
    }

    /// Get the file extension
    pub fn extension(&self) -> &str {
        self.file_type.extension()
    }
}

/// Type of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Php,
    Json,
}

impl FileType {
    /// Get the file extension for this type
    pub fn extension(&self) -> &str {
        match self {
            FileType::Php => "php",
            FileType::Json => "json",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.migrations_dir, PathBuf::from("database/migrations"));
        assert_eq!(config.output_dir, PathBuf::from("app/Http/Requests"));
        assert_eq!(config.extension, "php");
        assert_eq!(config.namespace, "App\\Http\\Requests");
        assert!(config.drop_unmapped);
        assert!(config.atomic_writes);
        assert_eq!(config.on_error, ErrorPolicy::Abort);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/output")
            .with_format(OutputFormat::Json)
            .with_namespace("\\Domain\\Requests\\")
            .keep_unmapped()
            .with_error_policy(ErrorPolicy::Continue)
            .dry_run();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.namespace, "Domain\\Requests");
        assert!(!config.drop_unmapped);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
        assert!(config.dry_run);
    }

    #[test]
    fn test_config_deserializes_partial_document() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{ "format": "json", "on_error": "continue", "skip": { "columns": ["uuid"] } }"#,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
        assert!(config.skip.skips_column("uuid"));
        assert!(!config.skip.skips_column("id"));
        assert!(config.skip.skips_table("migrations"));
        assert_eq!(config.extension, "php");
    }

    #[test]
    fn test_normalized_config_validates() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{ "namespace": "\\App\\Http\\Requests\\", "extension": ".php" }"#,
        )
        .unwrap();
        let config = config.normalized();

        assert_eq!(config.namespace, "App\\Http\\Requests");
        assert_eq!(config.extension, "php");
        assert!(config.validate().is_ok());
        assert!(GeneratorConfig::new().with_namespace("").is_valid());
    }

    #[test]
    fn test_invalid_namespace_and_extension() {
        let cases = [
            GeneratorConfig::new().with_namespace("App\\Http Requests"),
            GeneratorConfig::new().with_namespace("App\\\\Requests"),
            GeneratorConfig::new().with_namespace("1App"),
            GeneratorConfig::new().with_extension(""),
            GeneratorConfig::new().with_extension("tar/gz"),
        ];

        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, RulegenError::InvalidConfig(_)),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("PHP".parse::<OutputFormat>(), Ok(OutputFormat::Php));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.file_type().extension(), "json");
    }

    #[test]
    fn test_generated_file() {
        let file = GeneratedFile::new("User/UserRequest.php", "<?php", FileType::Php, "users");
        assert_eq!(file.extension(), "php");
        assert_eq!(file.table, "users");
    }
}
