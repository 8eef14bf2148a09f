//! Core traits for rulegen
//!
//! This module defines the traits shared across crates: validation of
//! extracted models and code generation into a target source language.

use crate::error::RulegenResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use rulegen_core::{Validatable, RulegenResult, RulegenError};
///
/// struct Table {
///     name: String,
/// }
///
/// impl Validatable for Table {
///     fn validate(&self) -> RulegenResult<()> {
///         if self.name.is_empty() {
///             return Err(RulegenError::validation("Table name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `RulegenError` describing the problem.
    fn validate(&self) -> RulegenResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// CodeGenerable Trait
// ============================================================================

/// Context passed to code generation methods
#[derive(Debug, Clone)]
pub struct CodeGenContext {
    /// Indentation level
    pub indent_level: usize,
    /// Use spaces (true) or tabs (false) for indentation
    pub use_spaces: bool,
    /// Number of spaces per indent level (if use_spaces is true)
    pub spaces_per_indent: usize,
    /// Emit a trailing separator after the last element of a list
    pub trailing_commas: bool,
}

impl Default for CodeGenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenContext {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            use_spaces: true,
            spaces_per_indent: 4,
            trailing_commas: true,
        }
    }

    /// Context positioned at a given indentation level
    pub fn at_level(indent_level: usize) -> Self {
        Self {
            indent_level,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.indent_level * self.spaces_per_indent)
        } else {
            "\t".repeat(self.indent_level)
        }
    }

    /// Create a new context with increased indentation
    pub fn indented(&self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
            ..self.clone()
        }
    }
}

/// Trait for types that can render themselves as source code
///
/// # Example
///
/// ```rust,ignore
/// use rulegen_core::{CodeGenerable, CodeGenContext, RulegenResult};
///
/// struct Rule(String);
///
/// impl CodeGenerable for Rule {
///     fn generate(&self, ctx: &CodeGenContext) -> RulegenResult<String> {
///         Ok(format!("{}'{}'", ctx.indent(), self.0))
///     }
/// }
/// ```
pub trait CodeGenerable {
    /// Generate code for this type
    fn generate(&self, ctx: &CodeGenContext) -> RulegenResult<String>;

    /// Generate code with default context
    fn generate_default(&self) -> RulegenResult<String> {
        self.generate(&CodeGenContext::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
