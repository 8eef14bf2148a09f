//! Recognizer for schema-builder migrations.
//!
//! Works on the token stream from [`Lexer`](crate::lexer::Lexer) and picks out
//! two shapes:
//!
//! ```text
//! Schema::create('<table>', ...)
//! $table-><type>('<column>' [, args])[-><modifier>(args)]* ;
//! ```
//!
//! Anything else is ignored. Malformed statements (unbalanced parentheses,
//! non-literal column names) are skipped without error.

use crate::column::ColumnSpec;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::skip::SkipLists;
use crate::table::TableSpec;
use rulegen_core::{ColumnType, ForeignRef};
use tracing::debug;

/// Name of the blueprint variable column statements are called on.
pub const BLUEPRINT_VARIABLE: &str = "table";

/// Blueprint methods that build indexes or constraints rather than columns.
const CONSTRAINT_METHODS: &[&str] = &[
    "foreign",
    "unique",
    "index",
    "primary",
    "fulltext",
    "spatialindex",
    "dropcolumn",
    "dropforeign",
    "dropindex",
    "dropunique",
    "dropprimary",
    "renamecolumn",
    "renameindex",
];

// ============================================================================
// Calls
// ============================================================================

/// A single call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Number(String),
    Ident(String),
    /// Named argument `name: value`
    Named(String, Box<Arg>),
    /// Anything that is not a single literal token
    Expr,
}

impl Arg {
    /// Non-negative integer literal
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Arg::Number(n) => n.parse().ok(),
            _ => None,
        }
    }
}

/// One `name(args)` call in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
    pub line: usize,
}

impl Call {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// String literal at position `i`
    pub fn str_arg(&self, i: usize) -> Option<&str> {
        match self.args.get(i) {
            Some(Arg::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Non-negative integer literal at position `i`
    pub fn u32_arg(&self, i: usize) -> Option<u32> {
        self.args.get(i).and_then(Arg::as_u32)
    }

    /// Value of the named argument `name`, wherever it appears
    pub fn named_arg(&self, name: &str) -> Option<&Arg> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Named(n, value) if n.eq_ignore_ascii_case(name) => Some(value.as_ref()),
            _ => None,
        })
    }

    /// Integer given positionally at `i` or as the named argument `name`
    pub fn u32_param(&self, i: usize, name: &str) -> Option<u32> {
        self.named_arg(name)
            .and_then(Arg::as_u32)
            .or_else(|| self.u32_arg(i))
    }

    /// Boolean flag semantics: no argument or `true` means on, `false` means off.
    pub fn flag(&self) -> bool {
        match self.args.first() {
            None => true,
            Some(Arg::Ident(v)) => !v.eq_ignore_ascii_case("false"),
            Some(_) => true,
        }
    }
}

/// A `$table->method(...)` call together with its chained modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintStatement {
    pub call: Call,
    pub modifiers: Vec<Call>,
}

impl BlueprintStatement {
    pub fn method(&self) -> &str {
        &self.call.name
    }

    /// The first argument, when it is a string literal
    pub fn target(&self) -> Option<&str> {
        self.call.str_arg(0)
    }

    pub fn modifier(&self, name: &str) -> Option<&Call> {
        self.modifiers.iter().rev().find(|m| m.is(name))
    }

    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m.is(name))
    }

    /// Whether this statement builds an index or constraint instead of a column
    pub fn is_constraint(&self) -> bool {
        CONSTRAINT_METHODS
            .iter()
            .any(|m| self.call.name.eq_ignore_ascii_case(m))
    }

    /// Build the column this statement defines.
    pub fn to_column(&self) -> Option<ColumnSpec> {
        if self.is_constraint() {
            return None;
        }
        let name = self.target()?;
        let column_type = ColumnType::from_method(self.method());
        let mut column = ColumnSpec::new(name, column_type);

        // The first numeric length modifier wins, then `string('c', N)` or
        // `string('c', length: N)`
        if column.column_type.is_string() {
            column.length = self
                .modifiers
                .iter()
                .filter(|m| m.is("length") || m.is("maxLength"))
                .find_map(|m| m.u32_param(0, "length"))
                .or_else(|| self.call.u32_param(1, "length"));
        }

        column.nullable = self.modifier("nullable").is_some_and(Call::flag);
        column.unique = self.has_modifier("unique");

        if let Some(table) = self.modifier("foreign").and_then(|m| m.str_arg(0)) {
            column.foreign_ref = Some(ForeignRef {
                table: table.to_string(),
                column: self
                    .modifier("references")
                    .and_then(|m| m.str_arg(0))
                    .map(str::to_string),
            });
        }

        Some(column)
    }
}

// ============================================================================
// Extraction result
// ============================================================================

/// Outcome of extracting a table from one migration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A create-table construct was found and is not skip-listed
    Table(TableSpec),
    /// The source has no create-table construct
    NoCreateStatement,
    /// The created table is skip-listed
    SkippedTable(String),
}

impl Extraction {
    pub fn table(self) -> Option<TableSpec> {
        match self {
            Extraction::Table(table) => Some(table),
            _ => None,
        }
    }
}

// ============================================================================
// MigrationParser
// ============================================================================

/// Parser over a tokenized migration source.
pub struct MigrationParser {
    tokens: Vec<Token>,
}

impl MigrationParser {
    pub fn new(source: &str) -> Self {
        Self {
            tokens: Lexer::tokenize(source),
        }
    }

    fn kind(&self, i: usize) -> Option<&TokenKind> {
        self.tokens.get(i).map(|t| &t.kind)
    }

    fn is_ident(&self, i: usize, name: &str) -> bool {
        matches!(self.kind(i), Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case(name))
    }

    /// Table name of the first `Schema::create('<name>', ...)` construct.
    pub fn create_table_name(&self) -> Option<&str> {
        (0..self.tokens.len()).find_map(|i| {
            if self.is_ident(i, "Schema")
                && self.kind(i + 1) == Some(&TokenKind::DoubleColon)
                && self.is_ident(i + 2, "create")
                && self.kind(i + 3) == Some(&TokenKind::LParen)
            {
                match self.kind(i + 4) {
                    Some(TokenKind::Str(name)) => Some(name.as_str()),
                    _ => None,
                }
            } else {
                None
            }
        })
    }

    /// Every `$table->method(...)` statement in source order.
    pub fn statements(&self) -> Vec<BlueprintStatement> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < self.tokens.len() {
            let starts_statement = matches!(
                self.kind(i),
                Some(TokenKind::Variable(v)) if v == BLUEPRINT_VARIABLE
            ) && self.kind(i + 1) == Some(&TokenKind::Arrow);

            if !starts_statement {
                i += 1;
                continue;
            }

            match self.parse_chain(i + 2) {
                Some((statement, next)) => {
                    out.push(statement);
                    i = next;
                }
                None => i += 1,
            }
        }

        out
    }

    /// Parse `method(args)[->modifier(args)]*` starting at the method name.
    fn parse_chain(&self, start: usize) -> Option<(BlueprintStatement, usize)> {
        let (call, mut pos) = self.parse_call(start)?;
        let mut modifiers = Vec::new();

        while self.kind(pos) == Some(&TokenKind::Arrow) {
            match self.parse_call(pos + 1) {
                Some((modifier, next)) => {
                    modifiers.push(modifier);
                    pos = next;
                }
                None => break,
            }
        }

        Some((BlueprintStatement { call, modifiers }, pos))
    }

    /// Parse `name(args)`; returns the call and the index after `)`.
    fn parse_call(&self, start: usize) -> Option<(Call, usize)> {
        let name_token = self.tokens.get(start)?;
        let TokenKind::Ident(name) = &name_token.kind else {
            return None;
        };
        if self.kind(start + 1) != Some(&TokenKind::LParen) {
            return None;
        }

        let mut args = Vec::new();
        let mut current: Vec<&TokenKind> = Vec::new();
        let mut depth = 1usize;
        let mut pos = start + 2;

        loop {
            let kind = self.kind(pos)?;
            pos += 1;

            match kind {
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        if kind != &TokenKind::RParen {
                            return None;
                        }
                        if !current.is_empty() {
                            args.push(to_arg(&current));
                        }
                        break;
                    }
                }
                TokenKind::Comma if depth == 1 => {
                    args.push(to_arg(&current));
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(kind);
        }

        Some((
            Call {
                name: name.clone(),
                args,
                line: name_token.line,
            },
            pos,
        ))
    }

    /// Build the table spec for `table_name` from every column statement.
    ///
    /// Skip-listed columns are dropped; redefined columns replace earlier
    /// definitions in place. Standalone `foreign('col')->references(..)->on(..)`
    /// and `unique('col')` statements annotate an already defined column
    /// instead of redefining it. Read as column statements they would turn
    /// `col` into an unmapped type and drop it from the rules, which is how a
    /// plain text match over the migration would see them.
    pub fn table_spec(&self, table_name: &str, skip: &SkipLists) -> TableSpec {
        let mut table = TableSpec::new(table_name);

        for statement in self.statements() {
            if statement.is_constraint() {
                apply_constraint(&mut table, &statement);
                continue;
            }

            let Some(column) = statement.to_column() else {
                continue;
            };

            if skip.skips_column(&column.name) {
                debug!(table = table_name, column = %column.name, "skipping column");
                continue;
            }

            debug!(
                table = table_name,
                column = %column.name,
                column_type = %column.column_type,
                line = statement.call.line,
                "column extracted",
            );
            if table.insert_column(column).is_some() {
                debug!(table = table_name, "column redefined, later definition wins");
            }
        }

        table
    }

    /// Full extraction: create-table lookup, table skip-list, columns.
    pub fn extract(&self, skip: &SkipLists) -> Extraction {
        let Some(name) = self.create_table_name() else {
            return Extraction::NoCreateStatement;
        };
        if skip.skips_table(name) {
            return Extraction::SkippedTable(name.to_string());
        }
        Extraction::Table(self.table_spec(name, skip))
    }
}

fn to_arg(tokens: &[&TokenKind]) -> Arg {
    match tokens {
        [TokenKind::Ident(name), TokenKind::Other(':'), value @ ..] if !value.is_empty() => {
            Arg::Named(name.clone(), Box::new(to_arg(value)))
        }
        [TokenKind::Str(s)] => Arg::Str(s.clone()),
        [TokenKind::Number(n)] => Arg::Number(n.clone()),
        [TokenKind::Ident(v)] => Arg::Ident(v.clone()),
        _ => Arg::Expr,
    }
}

fn apply_constraint(table: &mut TableSpec, statement: &BlueprintStatement) {
    let Some(column_name) = statement.target() else {
        return;
    };
    let Some(existing) = table.column(column_name) else {
        return;
    };
    let mut column = existing.clone();

    if statement.call.is("unique") {
        column.unique = true;
    } else if statement.call.is("foreign") && column.foreign_ref.is_none() {
        let on = statement.modifier("on").and_then(|m| m.str_arg(0));
        let references = statement.modifier("references").and_then(|m| m.str_arg(0));
        let (Some(on), Some(references)) = (on, references) else {
            return;
        };
        column.foreign_ref = Some(ForeignRef::new(on, references));
    } else {
        return;
    }

    table.insert_column(column);
}

/// Extract the table defined by a migration source.
pub fn extract_table(source: &str, skip: &SkipLists) -> Extraction {
    MigrationParser::new(source).extract(skip)
}

// ============================================================================
// Tests
// ============================================================================
