//! Error types for rulegen
//!
//! This module provides unified error handling across the generator,
//! covering filesystem errors, schema-file parsing and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rulegen
#[derive(Debug, Error)]
pub enum RulegenError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Table validation failed
    #[error("Table validation failed for '{table}': {message}")]
    TableValidation { table: String, message: String },

    /// Column validation failed
    #[error("Column validation failed for '{table}.{column}': {message}")]
    ColumnValidation {
        table: String,
        column: String,
        message: String,
    },

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Migrations directory does not exist
    #[error("Migrations directory not found: {0}")]
    MigrationsDirNotFound(PathBuf),

    /// Schema description file could not be parsed
    #[error("Failed to parse schema file '{path}': {message}")]
    SchemaParse { path: PathBuf, message: String },

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// Invalid output path
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl RulegenError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        RulegenError::Validation(msg.into())
    }

    /// Create a table validation error
    pub fn table_validation(table: impl Into<String>, msg: impl Into<String>) -> Self {
        RulegenError::TableValidation {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create a column validation error
    pub fn column_validation(
        table: impl Into<String>,
        column: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        RulegenError::ColumnValidation {
            table: table.into(),
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        RulegenError::InvalidConfig(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        RulegenError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RulegenError::Validation(_)
                | RulegenError::TableValidation { .. }
                | RulegenError::ColumnValidation { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            RulegenError::FileRead { .. }
                | RulegenError::FileWrite { .. }
                | RulegenError::DirectoryCreate { .. }
                | RulegenError::MigrationsDirNotFound(_)
        )
    }
}

/// Result type alias using RulegenError
pub type RulegenResult<T> = Result<T, RulegenError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> RulegenResult<T>;
}

impl<T, E: Into<RulegenError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> RulegenResult<T> {
        self.map_err(|e| {
            let err: RulegenError = e.into();
            RulegenError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
