use crate::ast::{Token, TokenKind};
use crate::error::LexError;
use crate::value::Number;

/// Splits filter text into [`Token`]s.
///
/// Offsets are byte offsets into the input. After the end of input the
/// lexer keeps returning [`TokenKind::Eof`].
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn consume_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let input = self.input;
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        &input[start..self.position]
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_start = self.position;
                    self.advance();
                    let unescaped = match self.current_char() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => {
                            self.advance();
                            result.push(self.read_unicode_escape(escape_start)?);
                            continue;
                        }
                        Some(other) => {
                            return Err(LexError::InvalidEscape {
                                sequence: format!("\\{other}"),
                                offset: escape_start,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { offset: start }),
                    };
                    result.push(unescaped);
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { offset: start })
    }

    /// Reads the hex digits after `\u`, joining a surrogate pair if one follows.
    fn read_unicode_escape(&mut self, escape_start: usize) -> Result<char, LexError> {
        let high = self.read_hex4(escape_start)?;

        let code = match high {
            0xD800..=0xDBFF => {
                if self.current_char() != Some('\\') || self.peek_char(1) != Some('u') {
                    return Err(self.invalid_escape(escape_start));
                }
                self.advance();
                self.advance();
                let low = self.read_hex4(escape_start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.invalid_escape(escape_start));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.invalid_escape(escape_start)),
            code => code,
        };

        char::from_u32(code).ok_or_else(|| self.invalid_escape(escape_start))
    }

    fn read_hex4(&mut self, escape_start: usize) -> Result<u32, LexError> {
        let mut code = 0;
        for _ in 0..4 {
            match self.current_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    code = code * 16 + digit;
                    self.advance();
                }
                None => {
                    // include the offending character in the reported sequence
                    self.advance();
                    return Err(self.invalid_escape(escape_start));
                }
            }
        }
        Ok(code)
    }

    fn invalid_escape(&self, escape_start: usize) -> LexError {
        LexError::InvalidEscape {
            sequence: self.input[escape_start..self.position].to_string(),
            offset: escape_start,
        }
    }

    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;

        if self.current_char() == Some('-') {
            self.advance();
        }
        self.consume_digits();

        if self.current_char() == Some('.') {
            self.advance();
            if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.malformed_number(start));
            }
            self.consume_digits();
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.current_char(), Some('+' | '-')) {
                self.advance();
            }
            if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.malformed_number(start));
            }
            self.consume_digits();
        }

        Number::parse(&self.input[start..self.position])
            .map(TokenKind::Number)
            .ok_or_else(|| self.malformed_number(start))
    }

    fn malformed_number(&self, start: usize) -> LexError {
        LexError::MalformedNumber {
            text: self.input[start..self.position].to_string(),
            offset: start,
        }
    }

    /// Consume `len` characters and produce a punctuation token.
    fn symbol(&mut self, kind: TokenKind, len: usize) -> TokenKind {
        for _ in 0..len {
            self.advance();
        }
        kind
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let kind = match self.current_char() {
            None => return Ok(Token::eof(start)),

            // Two-character operators are checked before their one-character prefixes.
            Some('!') if self.peek_char(1) == Some('=') => self.symbol(TokenKind::NotEq, 2),
            Some('!') => self.symbol(TokenKind::Exclamation, 1),
            Some('>') if self.peek_char(1) == Some('=') => self.symbol(TokenKind::GtEq, 2),
            Some('>') => self.symbol(TokenKind::Gt, 1),
            Some('<') if self.peek_char(1) == Some('=') => self.symbol(TokenKind::LtEq, 2),
            Some('<') => self.symbol(TokenKind::Lt, 1),
            Some('~') if self.peek_char(1) == Some('*') => self.symbol(TokenKind::TildeStar, 2),
            Some('~') => self.symbol(TokenKind::Tilde, 1),

            Some('|') => self.symbol(TokenKind::Pipe, 1),
            Some('&') => self.symbol(TokenKind::Ampersand, 1),
            Some('=') => self.symbol(TokenKind::Eq, 1),
            Some('#') => self.symbol(TokenKind::Hash, 1),
            Some('@') => self.symbol(TokenKind::At, 1),
            Some('(') => self.symbol(TokenKind::LParen, 1),
            Some(')') => self.symbol(TokenKind::RParen, 1),
            Some('{') => self.symbol(TokenKind::LBrace, 1),
            Some('}') => self.symbol(TokenKind::RBrace, 1),
            Some('[') => self.symbol(TokenKind::LBracket, 1),
            Some(']') => self.symbol(TokenKind::RBracket, 1),
            Some(',') => self.symbol(TokenKind::Comma, 1),
            Some(':') => self.symbol(TokenKind::Colon, 1),

            Some('"') => TokenKind::String(self.read_string()?),

            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,

            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => match self.read_identifier() {
                "true" => TokenKind::Boolean(true),
                "false" => TokenKind::Boolean(false),
                "null" => TokenKind::Null,
                ident => TokenKind::Identifier(ident.to_string()),
            },

            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    offset: start,
                });
            }
        };

        let token = Token::new(kind, &self.input[start..self.position], start);
        tracing::trace!(offset = token.offset, text = %token.text, "token");
        Ok(token)
    }

    /// Lex the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null nullable");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Boolean(true));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Boolean(false));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Null);
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Identifier("nullable".to_string())
    );
}

#[test]
fn test_comparison_offsets() {
    let mut lexer = Lexer::new("age >= 18");
    let field = lexer.next_token().unwrap();
    let op = lexer.next_token().unwrap();
    let value = lexer.next_token().unwrap();
    assert_eq!((field.offset, op.offset, value.offset), (0, 4, 7));
    assert_eq!(op.text, ">=");
    assert_eq!(lexer.next_token().unwrap(), Token::eof(9));
    assert_eq!(lexer.next_token().unwrap(), Token::eof(9));
}
