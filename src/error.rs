//! Error types for lexing and parsing filter expressions.
//!
//! Every failure carries the byte offset where it was detected. Callers
//! should treat all of these as bad client input, not internal faults.

use std::fmt;
use thiserror::Error;

/// A specialized Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while splitting input into tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A backslash sequence the string syntax doesn't define.
    #[error("invalid escape sequence '{sequence}' at offset {offset}")]
    InvalidEscape { sequence: String, offset: usize },

    /// Digits that don't form a valid number (`1.`, `2e`, `1e999`).
    #[error("malformed number '{text}' at offset {offset}")]
    MalformedNumber { text: String, offset: usize },
}

impl LexError {
    /// The message without its offset.
    pub fn reason(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { character, .. } => {
                format!("unexpected character '{character}'")
            }
            LexError::UnterminatedString { .. } => "unterminated string".to_string(),
            LexError::InvalidEscape { sequence, .. } => {
                format!("invalid escape sequence '{sequence}'")
            }
            LexError::MalformedNumber { text, .. } => format!("malformed number '{text}'"),
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { offset, .. }
            | LexError::UnterminatedString { offset }
            | LexError::InvalidEscape { offset, .. }
            | LexError::MalformedNumber { offset, .. } => *offset,
        }
    }
}

/// A well-formed token in the wrong place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("expected {expected}, found {found} at offset {offset}")]
pub struct SyntaxError {
    /// Byte offset of the offending token
    pub offset: usize,
    /// What the grammar required here
    pub expected: String,
    /// Description of the token actually present
    pub found: String,
}

impl SyntaxError {
    pub fn new(offset: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        SyntaxError {
            offset,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Any failure of [`parse`](crate::parse).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Parentheses, negations or nested literals went deeper than the
    /// configured limit.
    #[error("nesting depth exceeds limit of {limit} at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// More comparisons and bare literals than the configured limit.
    #[error("expression has more than {limit} terms at offset {offset}")]
    TooManyTerms { limit: usize, offset: usize },

    /// The input is longer than the configured limit.
    #[error("input length {length} exceeds limit of {limit} bytes")]
    TooLong { length: usize, limit: usize },
}

impl ParseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseError::Lex(_) => ErrorCategory::Lex,
            ParseError::Syntax(_) => ErrorCategory::Syntax,
            ParseError::TooDeep { .. }
            | ParseError::TooManyTerms { .. }
            | ParseError::TooLong { .. } => ErrorCategory::Limit,
        }
    }

    /// The message without its category or offset, for callers that print
    /// those separately.
    pub fn reason(&self) -> String {
        match self {
            ParseError::Lex(e) => e.reason(),
            ParseError::Syntax(e) => format!("expected {}, found {}", e.expected, e.found),
            ParseError::TooDeep { limit, .. } => format!("nesting depth exceeds limit of {limit}"),
            ParseError::TooManyTerms { limit, .. } => {
                format!("expression has more than {limit} terms")
            }
            ParseError::TooLong { length, limit } => {
                format!("input length {length} exceeds limit of {limit} bytes")
            }
        }
    }

    /// Byte offset where parsing stopped. For over-long input this is the
    /// first byte past the limit.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.offset(),
            ParseError::Syntax(e) => e.offset,
            ParseError::TooDeep { offset, .. } | ParseError::TooManyTerms { offset, .. } => {
                *offset
            }
            ParseError::TooLong { limit, .. } => *limit,
        }
    }
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Lex,
    Syntax,
    Limit,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Lex => "lex",
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Limit => "limit",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected field name passed to [`Identifier::new`](crate::ast::Identifier::new).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("invalid field name '{name}'")]
    Invalid { name: String },

    #[error("'{name}' is a keyword, not a field name")]
    Keyword { name: String },
}
