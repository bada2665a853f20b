use crate::{
    ast::{Identifier, Operand, PredicateNode, Token, TokenKind},
    error::{ParseError, ParseResult, SyntaxError},
    lexer::Lexer,
    limits::Limits,
    value::Value,
};
use std::collections::HashMap;
use std::mem;

/// Parse a filter expression with the default [`Limits`].
///
/// # Examples
///
/// ```
/// use where_lang::ast::{OperatorKind, Operand, PredicateNode};
/// use where_lang::value::Value;
///
/// let tree = where_lang::parse(r#"name~*"john""#).unwrap();
/// match tree {
///     PredicateNode::Comparison { field, operator, rhs } => {
///         assert_eq!(field.as_str(), "name");
///         assert_eq!(operator, OperatorKind::ILike);
///         assert_eq!(rhs, Operand::Value(Value::String("john".into())));
///     }
///     _ => panic!("expected a comparison"),
/// }
/// ```
pub fn parse(input: &str) -> ParseResult<PredicateNode> {
    parse_with_limits(input, &Limits::default())
}

/// Parse a filter expression, rejecting input that exceeds `limits`.
///
/// The whole input must form exactly one expression. The first error aborts
/// the parse and no partial tree is returned.
///
/// # Errors
///
/// - [`ParseError::TooLong`] if the input is longer than `limits.max_input_len`
/// - [`ParseError::Lex`] for characters or literals the lexer can't read
/// - [`ParseError::Syntax`] for tokens in the wrong place, including
///   trailing input after a complete expression
/// - [`ParseError::TooDeep`] if nesting exceeds `limits.max_depth`
pub fn parse_with_limits(input: &str, limits: &Limits) -> ParseResult<PredicateNode> {
    if input.len() > limits.max_input_len {
        let err = ParseError::TooLong {
            length: input.len(),
            limit: limits.max_input_len,
        };
        tracing::debug!(category = %err.category(), "rejected filter: {err}");
        return Err(err);
    }

    let result = Parser::with_limits(Lexer::new(input), *limits).and_then(|mut p| p.parse());

    match &result {
        Ok(tree) => tracing::debug!(len = input.len(), depth = tree.depth(), "parsed filter"),
        Err(err) => tracing::debug!(
            len = input.len(),
            category = %err.category(),
            offset = err.offset(),
            "rejected filter: {err}"
        ),
    }
    result
}

/// Recursive-descent parser over a token stream.
///
/// Precedence from loosest to tightest: `|`, `&`, `!`, atom.
///
/// ```text
/// expr           := or
/// or             := and_or_tighter ('|' or)?
/// and_or_tighter := not_or_tighter ('&' and_or_tighter)?
/// not_or_tighter := '!' atom | atom
/// atom           := '(' expr ')' | comparison | value
/// comparison     := IDENT op rhs
/// rhs            := IDENT | value | '(' rhs ')'
/// ```
///
/// Chains of the same operator are read in a loop and nested to the right.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    limits: Limits,
    depth: usize,
    terms: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> ParseResult<Self> {
        Self::with_limits(lexer, Limits::default())
    }

    pub fn with_limits(mut lexer: Lexer<'a>, limits: Limits) -> ParseResult<Self> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            limits,
            depth: 0,
            terms: 0,
        })
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if !self.check(&expected) {
            return Err(self.unexpected(format!("'{}'", expected.symbol())));
        }
        self.advance()
    }

    fn check(&self, token: &TokenKind) -> bool {
        mem::discriminant(&self.current_token.kind) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        SyntaxError::new(
            self.current_token.offset,
            expected,
            self.current_token.kind.describe(),
        )
        .into()
    }

    /// Step one level deeper, failing once the depth limit is passed.
    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.limits.max_depth,
                offset: self.current_token.offset,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Count one comparison or bare literal against the term limit.
    fn count_term(&mut self) -> ParseResult<()> {
        self.terms += 1;
        if self.terms > self.limits.max_terms {
            return Err(ParseError::TooManyTerms {
                limit: self.limits.max_terms,
                offset: self.current_token.offset,
            });
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.enter()?;
        let result = f(self);
        self.leave();
        result
    }

    /// Parse a complete expression and require the input to end after it.
    pub fn parse(&mut self) -> ParseResult<PredicateNode> {
        let expr = self.parse_expression()?;
        if !self.current_token.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> ParseResult<PredicateNode> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<PredicateNode> {
        let first = self.parse_and()?;
        let mut rest = Vec::new();

        while self.check(&TokenKind::Pipe) {
            self.advance()?;
            rest.push(self.parse_and()?);
        }
        Ok(join_right(first, rest, PredicateNode::or))
    }

    fn parse_and(&mut self) -> ParseResult<PredicateNode> {
        let first = self.parse_not()?;
        let mut rest = Vec::new();

        while self.check(&TokenKind::Ampersand) {
            self.advance()?;
            rest.push(self.parse_not()?);
        }
        Ok(join_right(first, rest, PredicateNode::and))
    }

    fn parse_not(&mut self) -> ParseResult<PredicateNode> {
        if self.check(&TokenKind::Exclamation) {
            self.advance()?;
            let operand = self.nested(Self::parse_atom)?;
            return Ok(PredicateNode::negate(operand));
        }
        self.parse_atom()
    }

    /// Parse atoms: a group, a comparison, or a bare literal.
    fn parse_atom(&mut self) -> ParseResult<PredicateNode> {
        match &self.current_token.kind {
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Identifier(_) => {
                self.count_term()?;
                self.parse_comparison()
            }
            kind if kind.starts_value() => {
                self.count_term()?;
                Ok(PredicateNode::Literal(self.parse_value()?))
            }
            _ => Err(self.unexpected("comparison, value or '('")),
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<PredicateNode> {
        let field = self.parse_identifier()?;

        let Some(operator) = self.current_token.kind.operator() else {
            return Err(self.unexpected(format!("comparison operator after '{field}'")));
        };
        self.advance()?;

        let rhs = self.parse_operand()?;
        Ok(PredicateNode::Comparison {
            field,
            operator,
            rhs,
        })
    }

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier(name) => Ok(Identifier::from_lexed(name)),
            // callers only get here after checking for an identifier
            other => Err(SyntaxError::new(token.offset, "identifier", other.describe()).into()),
        }
    }

    /// Right-hand side of a comparison: another field, a literal, or either
    /// wrapped in parentheses.
    fn parse_operand(&mut self) -> ParseResult<Operand> {
        match &self.current_token.kind {
            TokenKind::Identifier(_) => Ok(Operand::Field(self.parse_identifier()?)),
            TokenKind::LParen => {
                self.advance()?;
                let operand = self.nested(Self::parse_operand)?;
                self.expect(TokenKind::RParen)?;
                Ok(operand)
            }
            kind if kind.starts_value() => Ok(Operand::Value(self.parse_value()?)),
            _ => Err(self.unexpected("field or value")),
        }
    }

    /// Parse one literal value, recursing into arrays and objects.
    pub fn parse_value(&mut self) -> ParseResult<Value> {
        let value = match &self.current_token.kind {
            TokenKind::LBrace => return self.nested(Self::parse_object_literal),
            TokenKind::LBracket => return self.nested(Self::parse_array_literal),
            TokenKind::String(s) => Value::String(s.clone()),
            TokenKind::Number(n) => Value::Number(*n),
            TokenKind::Boolean(b) => Value::Bool(*b),
            TokenKind::Null => Value::Null,
            _ => return Err(self.unexpected("value")),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_object_literal(&mut self) -> ParseResult<Value> {
        self.expect(TokenKind::LBrace)?;
        let mut pairs = HashMap::new();

        if self.check(&TokenKind::RBrace) {
            self.advance()?;
            return Ok(Value::Object(pairs));
        }

        loop {
            let key = match &self.current_token.kind {
                TokenKind::String(s) => s.clone(),
                _ => return Err(self.unexpected("string key")),
            };
            self.advance()?;
            self.expect(TokenKind::Colon)?;

            let value = self.parse_value()?;
            if pairs.insert(key, value).is_some() {
                tracing::trace!("duplicate object key, keeping last value");
            }

            match &self.current_token.kind {
                TokenKind::Comma => {
                    self.advance()?;
                }
                TokenKind::RBrace => {
                    self.advance()?;
                    return Ok(Value::Object(pairs));
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
    }

    fn parse_array_literal(&mut self) -> ParseResult<Value> {
        self.expect(TokenKind::LBracket)?;
        let mut elements = vec![];

        if self.check(&TokenKind::RBracket) {
            self.advance()?;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            match &self.current_token.kind {
                TokenKind::Comma => {
                    self.advance()?;
                }
                TokenKind::RBracket => {
                    self.advance()?;
                    return Ok(Value::Array(elements));
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }
}

/// Fold a chain `a op b op c` into `op(a, op(b, c))`.
fn join_right(
    first: PredicateNode,
    rest: Vec<PredicateNode>,
    join: fn(PredicateNode, PredicateNode) -> PredicateNode,
) -> PredicateNode {
    let mut terms = rest.into_iter().rev();
    match terms.next() {
        Some(last) => join(first, terms.fold(last, |tail, term| join(term, tail))),
        None => first,
    }
}
