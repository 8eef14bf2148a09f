//! # Rule Mapper
//!
//! Converts extracted columns into ordered validation rule tokens.
//!
//! Token order for a column is fixed:
//!
//! ```text
//! <type rule> [max:N]   from the column type
//! required              unless nullable
//! unique:<table>,<col>  if unique
//! exists:<ft>,<fc>      if a complete foreign reference is present
//! ```

use rulegen_core::{ColumnType, RuleToken};
use rulegen_ir::{ColumnSpec, TableSpec};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

// ============================================================================
// Mapping
// ============================================================================

/// Type rules for a column type. Unmapped types yield an empty list.
pub fn base_rules(column_type: &ColumnType, length: Option<u32>) -> Vec<RuleToken> {
    let mut rules = match column_type {
        ColumnType::String | ColumnType::Text => vec![RuleToken::String],
        ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::SmallInteger
        | ColumnType::TinyInteger => vec![RuleToken::Integer],
        ColumnType::Decimal | ColumnType::Float => vec![RuleToken::Numeric],
        ColumnType::Boolean => vec![RuleToken::Boolean],
        ColumnType::Date | ColumnType::DateTime | ColumnType::Timestamp => vec![RuleToken::Date],
        ColumnType::Unknown(_) => Vec::new(),
    };

    if let (ColumnType::String, Some(length)) = (column_type, length) {
        rules.push(RuleToken::Max(length));
    }

    rules
}

/// Full rule list for one column of `table`.
///
/// Returns `None` when the column gets no entry: its type is unmapped and
/// `drop_unmapped` is set, or nothing at all applies to it.
pub fn assemble_rules(table: &str, column: &ColumnSpec, drop_unmapped: bool) -> Option<Vec<RuleToken>> {
    let mut rules = base_rules(&column.column_type, column.length);
    if rules.is_empty() && drop_unmapped {
        return None;
    }

    if !column.nullable {
        rules.push(RuleToken::Required);
    }
    if column.unique {
        rules.push(RuleToken::unique(table, &column.name));
    }
    if let Some((foreign_table, foreign_column)) =
        column.foreign_ref.as_ref().and_then(|f| f.target())
    {
        rules.push(RuleToken::exists(foreign_table, foreign_column));
    }

    (!rules.is_empty()).then_some(rules)
}

/// Rule set for every column of a table, in column order.
pub fn build_rule_set(table: &TableSpec, drop_unmapped: bool) -> RuleSet {
    let mut set = RuleSet::new(&table.name);

    for column in table.columns() {
        match assemble_rules(&table.name, column, drop_unmapped) {
            Some(rules) => set.push(&column.name, rules),
            None => debug!(
                table = %table.name,
                column = %column.name,
                column_type = %column.column_type,
                "no rules for column",
            ),
        }
    }

    set
}

// ============================================================================
// RuleSet
// ============================================================================

/// Ordered mapping of column name to rule tokens for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    table: String,
    entries: Vec<(String, Vec<RuleToken>)>,
}

impl RuleSet {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry. Column names are unique in a [`TableSpec`], so no
    /// merging happens here.
    pub fn push(&mut self, column: impl Into<String>, rules: Vec<RuleToken>) {
        self.entries.push((column.into(), rules));
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn entries(&self) -> &[(String, Vec<RuleToken>)] {
        &self.entries
    }

    /// Rules for a column, if it has an entry
    pub fn get(&self, column: &str) -> Option<&[RuleToken]> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, rules) in &self.entries {
            map.serialize_entry(column, rules)?;
        }
        map.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
