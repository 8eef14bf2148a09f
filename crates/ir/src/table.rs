//! Table definitions extracted from migrations
//!
//! A `TableSpec` holds the columns of one create-table construct in source
//! order. Redefining a column replaces the earlier definition but keeps the
//! position where the name first appeared.

use crate::column::ColumnSpec;
use rulegen_core::{RulegenError, RulegenResult, Validatable};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// ============================================================================
// TableSpec
// ============================================================================

/// Represents one created table and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    /// Table name as written in the create statement
    pub name: String,

    /// Columns in first-occurrence order
    columns: Vec<ColumnSpec>,

    /// Lookup: column name → index into `columns`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TableSpec {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a column, replacing any earlier column with the same name.
    ///
    /// Returns the replaced column, if any.
    pub fn insert_column(&mut self, column: ColumnSpec) -> Option<ColumnSpec> {
        match self.index.get(&column.name) {
            Some(&i) => Some(std::mem::replace(&mut self.columns[i], column)),
            None => {
                self.index.insert(column.name.clone(), self.columns.len());
                self.columns.push(column);
                None
            }
        }
    }

    /// Builder form of [`insert_column`](Self::insert_column)
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.insert_column(column);
        self
    }

    /// Columns in first-occurrence order
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Validatable for TableSpec {
    fn validate(&self) -> RulegenResult<()> {
        if !rulegen_core::is_valid_identifier(&self.name) {
            return Err(RulegenError::table_validation(
                &self.name,
                "table name is not a valid identifier",
            ));
        }
        for column in &self.columns {
            if !rulegen_core::is_valid_identifier(&column.name) {
                return Err(RulegenError::column_validation(
                    &self.name,
                    &column.name,
                    "column name is not a valid identifier",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawTable {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnSpec>,
}

impl<'de> Deserialize<'de> for TableSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTable::deserialize(deserializer)?;
        let mut table = TableSpec::new(raw.name);
        for column in raw.columns {
            table.insert_column(column);
        }
        Ok(table)
    }
}

// ============================================================================
// Tests
// ============================================================================
