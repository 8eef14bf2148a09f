//! # rulegen IR (Intermediate Representation)
//!
//! Data structures describing the tables found in migration sources, and the
//! machinery that produces them.
//!
//! ## Core Concepts
//!
//! - **ColumnSpec**: one column with its type and modifiers
//! - **TableSpec**: a created table and its columns in source order
//! - **MigrationParser**: tokenizer-backed recognizer for schema-builder migrations
//! - **MigrationLocator**: enumerates migration files in a directory
//! - **SchemaDocument**: structured JSON alternative to migration sources
//!

// Module declarations
pub mod column;
pub mod lexer;
pub mod locator;
pub mod parser;
pub mod schema_file;
pub mod skip;
pub mod table;

// Re-export commonly used types at crate root
pub use column::ColumnSpec;
pub use lexer::{Lexer, Token, TokenKind};
pub use locator::{DEFAULT_EXTENSION, MigrationLocator};
pub use parser::{Arg, BlueprintStatement, Call, Extraction, MigrationParser, extract_table};
pub use schema_file::{SchemaDocument, load_schema, load_schema_from_str};
pub use skip::{DEFAULT_SKIP_COLUMNS, DEFAULT_SKIP_TABLES, SkipLists};
pub use table::TableSpec;

// Re-export core types that are commonly used with IR
pub use rulegen_core::{ColumnType, ForeignRef, RulegenError, RulegenResult};

/// Current version of the JSON schema-description format
pub const SCHEMA_VERSION: u32 = 1;
