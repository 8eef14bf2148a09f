//! Tokenizer for schema-builder migration sources.
//!
//! Only the lexical shapes needed to recognize `Schema::create(...)` and
//! `$table->method(...)->modifier(...)` chains are distinguished; everything
//! else is passed through as [`TokenKind::Other`].

/// Kinds of tokens produced by the [`Lexer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `$name` (stored without the sigil)
    Variable(String),
    /// Bare identifier or keyword
    Ident(String),
    /// Quoted string literal, unescaped
    Str(String),
    /// Numeric literal, as written
    Number(String),
    /// `->` or `?->`
    Arrow,
    /// `::`
    DoubleColon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    /// Any other single character
    Other(char),
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line of the token start
    pub line: usize,
}

/// A lexer over migration source text.
///
/// Iteration stops at end of input or at an unterminated string literal.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    start: usize,
    line: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            done: false,
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(input: &'a str) -> Vec<Token> {
        Lexer::new(input).collect()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips whitespace and `//`, `#`, `/* */` comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('/'), Some('/')) | (Some('#'), _) => {
                    self.skip_line();
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            None => break,
                            _ => {}
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn make_token(&self, kind: TokenKind, line: usize) -> Token {
        Token { kind, line }
    }

    fn scan_word(&mut self) -> &'a str {
        let begin = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        &self.input[begin..self.pos]
    }

    fn scan_number(&mut self) -> String {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.input[self.start..self.pos].to_string()
    }

    /// Scans a quoted string. Returns `None` if the closing quote is missing.
    fn scan_string(&mut self, quote: char) -> Option<String> {
        self.advance(); // opening quote
        let mut out = String::new();

        loop {
            let c = self.advance()?;
            if c == quote {
                return Some(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }

            let escaped = self.advance()?;
            match (quote, escaped) {
                (_, '\\') => out.push('\\'),
                (q, e) if q == e => out.push(e),
                ('"', 'n') => out.push('\n'),
                ('"', 't') => out.push('\t'),
                ('"', '$') => out.push('$'),
                (_, other) => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        self.skip_whitespace_and_comments();
        self.start = self.pos;
        let line = self.line;

        let Some(c) = self.peek() else {
            self.done = true;
            return None;
        };

        let kind = match c {
            '$' if self
                .peek_next()
                .is_some_and(|n| n.is_alphabetic() || n == '_') =>
            {
                self.advance();
                TokenKind::Variable(self.scan_word().to_string())
            }
            c if c.is_alphabetic() || c == '_' => TokenKind::Ident(self.scan_word().to_string()),
            c if c.is_ascii_digit() => TokenKind::Number(self.scan_number()),
            '\'' | '"' => match self.scan_string(c) {
                Some(s) => TokenKind::Str(s),
                None => {
                    self.done = true;
                    return None;
                }
            },
            '-' if self.peek_next() == Some('>') => {
                self.advance();
                self.advance();
                TokenKind::Arrow
            }
            '?' if self.input[self.pos..].starts_with("?->") => {
                self.advance();
                self.advance();
                self.advance();
                TokenKind::Arrow
            }
            ':' if self.peek_next() == Some(':') => {
                self.advance();
                self.advance();
                TokenKind::DoubleColon
            }
            _ => {
                self.advance();
                match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    other => TokenKind::Other(other),
                }
            }
        };

        Some(self.make_token(kind, line))
    }
}

// ============================================================================
// Tests
// ============================================================================
