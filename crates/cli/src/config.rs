//! Configuration file loading and command-line overrides
//!
//! ```toml
//! migrations_dir = "database/migrations"
//! output_dir = "app/Http/Requests"
//! format = "php"
//! namespace = "App\\Http\\Requests"
//! drop_unmapped = true
//! atomic_writes = true
//! on_error = "abort"
//!
//! [skip]
//! tables = ["jobs", "failed_jobs", "migrations"]
//! columns = ["id", "created_at", "updated_at"]
//! ```

use anyhow::Context;
use rulegen_codegen::{ErrorPolicy, GeneratorConfig};
use rulegen_core::{RulegenResult, Validatable};
use std::path::Path;
use tracing::debug;

use crate::GenerateArgs;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "rulegen.toml";

/// Parse a TOML configuration document. Every key is optional.
pub fn parse_config(toml_text: &str) -> RulegenResult<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(toml_text)?;
    let config = config.normalized();
    config.validate()?;
    Ok(config)
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `rulegen.toml` in the working
/// directory is used if present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
        None => {
            debug!("no config file, using defaults");
            return Ok(GeneratorConfig::default());
        }
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Invalid config file '{}'", path.display()))?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Apply `generate` flags on top of a loaded configuration.
///
/// Skip flags extend the configured lists rather than replacing them.
pub fn apply_overrides(
    mut config: GeneratorConfig,
    args: &GenerateArgs,
) -> RulegenResult<GeneratorConfig> {
    if let Some(dir) = &args.migrations {
        config.migrations_dir = dir.clone();
    }
    if let Some(dir) = &args.output {
        config.output_dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(namespace) = &args.namespace {
        config = config.with_namespace(namespace.as_str());
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }

    config.skip.tables.extend(args.skip_tables.iter().cloned());
    config.skip.columns.extend(args.skip_columns.iter().cloned());

    if args.keep_unmapped {
        config.drop_unmapped = false;
    }
    if args.continue_on_error {
        config.on_error = ErrorPolicy::Continue;
    }
    if args.no_atomic {
        config.atomic_writes = false;
    }
    config.dry_run = args.dry_run;

    config.validate()?;
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
