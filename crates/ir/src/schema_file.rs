//! Structured schema descriptions
//!
//! As an alternative to scraping migration sources, tables can be described
//! directly in a JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "tables": [
//!     { "name": "examples", "columns": [
//!       { "name": "name", "type": "string", "length": 50 },
//!       { "name": "category_id", "type": "integer",
//!         "foreign": { "table": "categories", "column": "id" } }
//!     ] }
//!   ]
//! }
//! ```

use crate::parser::Extraction;
use crate::skip::SkipLists;
use crate::table::TableSpec;
use crate::SCHEMA_VERSION;
use rulegen_core::{RulegenError, RulegenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// A JSON schema-description document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Document format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Table descriptions, processed in order
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

impl SchemaDocument {
    pub fn new(tables: Vec<TableSpec>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            tables,
        }
    }

    /// Apply skip-lists, yielding one extraction per described table.
    pub fn extractions(&self, skip: &SkipLists) -> Vec<Extraction> {
        self.tables
            .iter()
            .map(|table| {
                if skip.skips_table(&table.name) {
                    return Extraction::SkippedTable(table.name.clone());
                }
                let kept = table
                    .columns()
                    .iter()
                    .filter(|c| !skip.skips_column(&c.name))
                    .cloned()
                    .fold(TableSpec::new(&table.name), TableSpec::with_column);
                Extraction::Table(kept)
            })
            .collect()
    }
}

/// Load a schema document from a JSON string
pub fn load_schema_from_str(json: &str) -> RulegenResult<SchemaDocument> {
    let doc: SchemaDocument = serde_json::from_str(json)?;
    if doc.version > SCHEMA_VERSION {
        return Err(RulegenError::validation(format!(
            "unsupported schema version {} (latest is {})",
            doc.version, SCHEMA_VERSION
        )));
    }
    Ok(doc)
}

/// Load a schema document from a file
pub fn load_schema(path: impl AsRef<Path>) -> RulegenResult<SchemaDocument> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| RulegenError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_schema_from_str(&json).map_err(|e| RulegenError::SchemaParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rulegen_core::{ColumnType, ForeignRef};
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "tables": [
            { "name": "examples", "columns": [
                { "name": "id", "type": "bigInteger" },
                { "name": "name", "type": "string", "length": 50 },
                { "name": "category_id", "type": "integer",
                  "foreign": { "table": "categories", "column": "id" } }
            ] },
            { "name": "sessions", "columns": [ { "name": "payload", "type": "text" } ] }
        ]
    }"#;

    #[test]
    fn test_load_from_str() {
        let doc = load_schema_from_str(DOC).unwrap();
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert_eq!(doc.tables.len(), 2);
        assert_eq!(doc.tables[0].column_count(), 3);
    }

    #[test]
    fn test_extractions_apply_skip_lists() {
        let doc = load_schema_from_str(DOC).unwrap();
        let extractions = doc.extractions(&SkipLists::default());

        let Extraction::Table(examples) = &extractions[0] else {
            panic!("expected table, got {:?}", extractions[0]);
        };
        assert!(examples.column("id").is_none());
        assert_eq!(examples.column("name").unwrap().column_type, ColumnType::String);
        assert_eq!(
            examples.column("category_id").unwrap().foreign_ref,
            Some(ForeignRef::new("categories", "id"))
        );

        assert_eq!(extractions[1], Extraction::SkippedTable("sessions".into()));
    }

    #[test]
    fn test_rejects_future_version() {
        let err = load_schema_from_str(r#"{ "version": 99, "tables": [] }"#).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_from_file_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ not json").unwrap();

        match load_schema(&path) {
            Err(RulegenError::SchemaParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected SchemaParse, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_schema("/nonexistent/schema.json"),
            Err(RulegenError::FileRead { .. })
        ));
    }
}
