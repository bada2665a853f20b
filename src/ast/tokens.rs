use crate::ast::OperatorKind;
use crate::value::Number;

/// A lexical token with its source text and byte offset.
///
/// Tokens are produced once by the [`Lexer`](crate::lexer::Lexer) and consumed
/// left to right by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is
    pub kind: TokenKind,

    /// Raw source text, including quotes for strings
    pub text: String,

    /// Byte offset of the first character in the input
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// End-of-input marker positioned at `offset`.
    pub fn eof(offset: usize) -> Self {
        Token::new(TokenKind::Eof, "", offset)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Signed integer or decimal number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -3.5
    /// 1e-3
    /// ```
    Number(Number),

    /// String literal enclosed in double quotes, escapes resolved
    ///
    /// # Examples
    /// ```text
    /// "john"
    /// "tab\there"
    /// ```
    String(String),

    /// `true` or `false`
    Boolean(bool),

    /// `null`
    Null,

    /// Field name
    ///
    /// Must start with an ASCII letter or underscore, followed by ASCII
    /// letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// age
    /// start_date
    /// _internal
    /// ```
    Identifier(String),

    // Logical
    /// `|` (OR)
    Pipe,

    /// `&` (AND)
    Ampersand,

    /// `!` (NOT)
    Exclamation,

    // Comparison
    /// `=`
    Eq,

    /// `!=`
    NotEq,

    /// `>`
    Gt,

    /// `>=`
    GtEq,

    /// `<`
    Lt,

    /// `<=`
    LtEq,

    /// `~` (pattern match)
    Tilde,

    /// `~*` (case-insensitive pattern match)
    TildeStar,

    /// `#` (contains)
    Hash,

    /// `@` (member of)
    At,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Left brace for object literals
    LBrace,

    /// Right brace
    RBrace,

    /// Left bracket for array literals
    LBracket,

    /// Right bracket
    RBracket,

    /// Separates array elements and object pairs
    Comma,

    /// Separates an object key from its value
    Colon,

    /// End of input
    Eof,
}

impl TokenKind {
    /// The comparison operator this token spells, if any.
    pub fn operator(&self) -> Option<OperatorKind> {
        match self {
            TokenKind::Eq => Some(OperatorKind::Eq),
            TokenKind::NotEq => Some(OperatorKind::Ne),
            TokenKind::Gt => Some(OperatorKind::Gt),
            TokenKind::GtEq => Some(OperatorKind::Ge),
            TokenKind::Lt => Some(OperatorKind::Lt),
            TokenKind::LtEq => Some(OperatorKind::Le),
            TokenKind::Tilde => Some(OperatorKind::Like),
            TokenKind::TildeStar => Some(OperatorKind::ILike),
            TokenKind::Hash => Some(OperatorKind::Contains),
            TokenKind::At => Some(OperatorKind::In),
            _ => None,
        }
    }

    /// Whether a value literal can start with this token.
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::Boolean(_)
                | TokenKind::Null
                | TokenKind::LBracket
                | TokenKind::LBrace
        )
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number {n}"),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Boolean(b) => format!("'{b}'"),
            TokenKind::Null => "'null'".to_string(),
            TokenKind::Identifier(name) => format!("identifier '{name}'"),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    /// Source spelling of punctuation tokens; empty for literals and identifiers.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Pipe => "|",
            TokenKind::Ampersand => "&",
            TokenKind::Exclamation => "!",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "!=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Tilde => "~",
            TokenKind::TildeStar => "~*",
            TokenKind::Hash => "#",
            TokenKind::At => "@",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            _ => "",
        }
    }

    /// Short category name, used when listing tokens.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Null => "null",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Pipe | TokenKind::Ampersand | TokenKind::Exclamation => "logical",
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket => "grouping",
            TokenKind::Comma | TokenKind::Colon => "separator",
            TokenKind::Eof => "eof",
            _ => "operator",
        }
    }
}
