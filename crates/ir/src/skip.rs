//! Tables and columns excluded from rule generation
//!
//! Framework bookkeeping tables (queues, sessions, the migrations table
//! itself) and automatically managed columns (primary keys, timestamps)
//! never receive request validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tables skipped unless configured otherwise
pub const DEFAULT_SKIP_TABLES: &[&str] = &[
    "jobs",
    "failed_jobs",
    "migrations",
    "password_resets",
    "personal_access_tokens",
    "sessions",
];

/// Columns skipped unless configured otherwise
pub const DEFAULT_SKIP_COLUMNS: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "deleted_at",
    "email_verified_at",
];

/// Skip-lists applied during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipLists {
    /// Table names for which no output is produced
    pub tables: BTreeSet<String>,

    /// Column names that never appear in a rule set
    pub columns: BTreeSet<String>,
}

impl Default for SkipLists {
    fn default() -> Self {
        Self {
            tables: DEFAULT_SKIP_TABLES.iter().map(|s| s.to_string()).collect(),
            columns: DEFAULT_SKIP_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SkipLists {
    /// Skip-lists that exclude nothing
    pub fn none() -> Self {
        Self {
            tables: BTreeSet::new(),
            columns: BTreeSet::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.tables.insert(table.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.insert(column.into());
        self
    }

    pub fn skips_table(&self, name: &str) -> bool {
        self.tables.contains(name)
    }

    pub fn skips_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let skip = SkipLists::default();
        assert!(skip.skips_table("migrations"));
        assert!(skip.skips_table("failed_jobs"));
        assert!(!skip.skips_table("users"));
        assert!(skip.skips_column("id"));
        assert!(skip.skips_column("email_verified_at"));
        assert!(!skip.skips_column("email"));
    }

    #[test]
    fn test_none_and_builders() {
        let skip = SkipLists::none().with_table("audits").with_column("uuid");
        assert!(skip.skips_table("audits"));
        assert!(!skip.skips_table("jobs"));
        assert!(skip.skips_column("uuid"));
        assert!(!skip.skips_column("id"));
    }

    #[test]
    fn test_partial_toml_keeps_other_default() {
        let skip: SkipLists = toml::from_str(r#"tables = ["audits"]"#).unwrap();
        assert_eq!(skip.tables.len(), 1);
        assert!(skip.skips_column("created_at"));
    }
}
