//! Core types used throughout rulegen
//!
//! This module contains the semantic column types recognized in migrations,
//! foreign-key references, and the validation rule tokens that the rule
//! mapper produces and the emitters render.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Column Types
// ============================================================================

/// Semantic type of a column, resolved from the schema-builder method name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// `string(...)`: VARCHAR
    String,
    /// `text(...)`
    Text,
    /// `integer(...)`
    Integer,
    /// `bigInteger(...)`
    BigInteger,
    /// `smallInteger(...)`
    SmallInteger,
    /// `tinyInteger(...)`
    TinyInteger,
    /// `decimal(...)`
    Decimal,
    /// `float(...)`
    Float,
    /// `boolean(...)`
    Boolean,
    /// `date(...)`
    Date,
    /// `dateTime(...)`
    DateTime,
    /// `timestamp(...)`
    Timestamp,
    /// Any other method; keeps the lowercased method name
    Unknown(String),
}

impl ColumnType {
    /// Resolve a schema-builder method name (case-insensitive)
    pub fn from_method(method: &str) -> Self {
        let lower = method.to_lowercase();
        match lower.as_str() {
            "string" => ColumnType::String,
            "text" => ColumnType::Text,
            "integer" => ColumnType::Integer,
            "biginteger" => ColumnType::BigInteger,
            "smallinteger" => ColumnType::SmallInteger,
            "tinyinteger" => ColumnType::TinyInteger,
            "decimal" => ColumnType::Decimal,
            "float" => ColumnType::Float,
            "boolean" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "timestamp" => ColumnType::Timestamp,
            _ => ColumnType::Unknown(lower),
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "biginteger",
            ColumnType::SmallInteger => "smallinteger",
            ColumnType::TinyInteger => "tinyinteger",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Unknown(name) => name,
        }
    }

    /// Whether this is the `string` type (the only type that carries a length)
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ColumnType::Unknown(_))
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        ColumnType::from_method(&value)
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Foreign References
// ============================================================================

/// Target of a `foreign(...)->references(...)` modifier chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignRef {
    /// Referenced table
    pub table: String,
    /// Referenced column, if `references(...)` was present
    #[serde(default)]
    pub column: Option<String>,
}

impl ForeignRef {
    /// Reference to a table without a known column
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: None,
        }
    }

    /// Fully specified reference
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: Some(column.into()),
        }
    }

    /// Table and column, if both are present and non-empty
    pub fn target(&self) -> Option<(&str, &str)> {
        match self.column.as_deref() {
            Some(column) if !self.table.is_empty() && !column.is_empty() => {
                Some((self.table.as_str(), column))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Rule Tokens
// ============================================================================

/// A single validation constraint in a generated rule list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleToken {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `numeric`
    Numeric,
    /// `boolean`
    Boolean,
    /// `date`
    Date,
    /// `max:N`
    Max(u32),
    /// `required`
    Required,
    /// `unique:table,column`
    Unique { table: String, column: String },
    /// `exists:table,column`
    Exists { table: String, column: String },
}

impl RuleToken {
    pub fn unique(table: impl Into<String>, column: impl Into<String>) -> Self {
        RuleToken::Unique {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn exists(table: impl Into<String>, column: impl Into<String>) -> Self {
        RuleToken::Exists {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::String => write!(f, "string"),
            RuleToken::Integer => write!(f, "integer"),
            RuleToken::Numeric => write!(f, "numeric"),
            RuleToken::Boolean => write!(f, "boolean"),
            RuleToken::Date => write!(f, "date"),
            RuleToken::Max(n) => write!(f, "max:{}", n),
            RuleToken::Required => write!(f, "required"),
            RuleToken::Unique { table, column } => write!(f, "unique:{},{}", table, column),
            RuleToken::Exists { table, column } => write!(f, "exists:{},{}", table, column),
        }
    }
}

impl Serialize for RuleToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Check that a table or column name can be used verbatim in generated code
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    // First character must be letter or underscore
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }

    // Rest must be alphanumeric or underscore
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_type_from_method_is_case_insensitive() {
        assert_eq!(ColumnType::from_method("string"), ColumnType::String);
        assert_eq!(ColumnType::from_method("bigInteger"), ColumnType::BigInteger);
        assert_eq!(ColumnType::from_method("dateTime"), ColumnType::DateTime);
        assert_eq!(ColumnType::from_method("TINYINTEGER"), ColumnType::TinyInteger);
    }

    #[test]
    fn test_column_type_unknown_keeps_lowercased_name() {
        let ty = ColumnType::from_method("jsonB");
        assert!(ty.is_unknown());
        assert_eq!(ty.as_str(), "jsonb");
        assert_eq!(ty.to_string(), "jsonb");
    }

    #[test]
    fn test_column_type_serde_as_string() {
        let ty: ColumnType = serde_json::from_str("\"smallInteger\"").unwrap();
        assert_eq!(ty, ColumnType::SmallInteger);
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"smallinteger\"");
    }

    #[test]
    fn test_foreign_ref_target() {
        assert_eq!(
            ForeignRef::new("categories", "id").target(),
            Some(("categories", "id"))
        );
        assert_eq!(ForeignRef::table("categories").target(), None);
        assert_eq!(ForeignRef::new("categories", "").target(), None);
    }

    #[test]
    fn test_rule_token_display() {
        assert_eq!(RuleToken::String.to_string(), "string");
        assert_eq!(RuleToken::Max(50).to_string(), "max:50");
        assert_eq!(RuleToken::Required.to_string(), "required");
        assert_eq!(
            RuleToken::unique("users", "email").to_string(),
            "unique:users,email"
        );
        assert_eq!(
            RuleToken::exists("categories", "id").to_string(),
            "exists:categories,id"
        );
    }

    #[test]
    fn test_rule_token_serializes_as_string() {
        let tokens = vec![RuleToken::Integer, RuleToken::exists("categories", "id")];
        assert_eq!(
            serde_json::to_string(&tokens).unwrap(),
            r#"["integer","exists:categories,id"]"#
        );
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("users"));
        assert!(is_valid_identifier("_tmp"));
        assert!(is_valid_identifier("category_id"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1users"));
        assert!(!is_valid_identifier("e-mail"));
    }
}
