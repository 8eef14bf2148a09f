//! Column definitions extracted from migrations
//!
//! This module contains the `ColumnSpec` struct describing one column of a
//! table as inferred from a column-definition statement.

use rulegen_core::{ColumnType, ForeignRef, RulegenError, RulegenResult, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// ColumnSpec
// ============================================================================

/// Metadata for a single column (maps to one `$table->type('name')` statement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Semantic column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Maximum length (only meaningful for `string` columns)
    #[serde(default)]
    pub length: Option<u32>,

    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,

    /// Whether the column carries a unique index
    #[serde(default)]
    pub unique: bool,

    /// Foreign key target, if declared
    #[serde(default, rename = "foreign")]
    pub foreign_ref: Option<ForeignRef>,
}

impl ColumnSpec {
    /// Create a non-nullable column with no modifiers
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            length: None,
            nullable: false,
            unique: false,
            foreign_ref: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_foreign(mut self, foreign_ref: ForeignRef) -> Self {
        self.foreign_ref = Some(foreign_ref);
        self
    }

    /// The length that applies to validation (ignored for non-string types)
    pub fn effective_length(&self) -> Option<u32> {
        if self.column_type.is_string() {
            self.length
        } else {
            None
        }
    }
}

impl Validatable for ColumnSpec {
    fn validate(&self) -> RulegenResult<()> {
        if !rulegen_core::is_valid_identifier(&self.name) {
            return Err(RulegenError::validation(format!(
                "Column name '{}' is not a valid identifier",
                self.name
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
