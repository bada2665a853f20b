use crate::ast::OperatorKind;
use crate::error::{IdentifierError, ParseError};
use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// A field name on either side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a field name.
    ///
    /// Names follow the lexer's rules, and the keywords `true`, `false` and
    /// `null` are rejected because they would never read back as fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use where_lang::ast::Identifier;
    ///
    /// assert!(Identifier::new("start_date").is_ok());
    /// assert!(Identifier::new("2fast").is_err());
    /// assert!(Identifier::new("null").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = name.into();
        if !IDENTIFIER.is_match(&name) {
            return Err(IdentifierError::Invalid { name });
        }
        if matches!(name.as_str(), "true" | "false" | "null") {
            return Err(IdentifierError::Keyword { name });
        }
        Ok(Identifier(name))
    }

    /// Wrap a name the lexer has already validated.
    pub(crate) fn from_lexed(name: String) -> Self {
        Identifier(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Another field (`start_date<end_date`)
    Field(Identifier),

    /// A constant (`age>=18`)
    Value(Value),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Field(name) => write!(f, "{name}"),
            Operand::Value(value) => write!(f, "{value}"),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<Identifier> for Operand {
    fn from(field: Identifier) -> Self {
        Operand::Field(field)
    }
}

/// A node of the predicate tree produced by [`parse`](crate::parse).
///
/// The tree is built once per parse and never mutated. `And` and `Or` are
/// strictly binary; chains like `a=1&b=2&c=3` nest to the right.
///
/// # Examples
///
/// ```
/// use where_lang::ast::{OperatorKind, PredicateNode};
///
/// let tree = where_lang::parse("age>=18&!banned=true").unwrap();
/// assert!(matches!(tree, PredicateNode::And { .. }));
/// assert_eq!(tree.to_string(), "age>=18&!banned=true");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    /// `field op rhs`
    Comparison {
        field: Identifier,
        operator: OperatorKind,
        rhs: Operand,
    },

    /// `left & right`
    And {
        left: Box<PredicateNode>,
        right: Box<PredicateNode>,
    },

    /// `left | right`
    Or {
        left: Box<PredicateNode>,
        right: Box<PredicateNode>,
    },

    /// `!operand`
    Not { operand: Box<PredicateNode> },

    /// Bare value with no comparison (`true`)
    Literal(Value),
}

impl PredicateNode {
    pub fn comparison(field: Identifier, operator: OperatorKind, rhs: impl Into<Operand>) -> Self {
        PredicateNode::Comparison {
            field,
            operator,
            rhs: rhs.into(),
        }
    }

    pub fn and(left: PredicateNode, right: PredicateNode) -> Self {
        PredicateNode::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: PredicateNode, right: PredicateNode) -> Self {
        PredicateNode::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(operand: PredicateNode) -> Self {
        PredicateNode::Not {
            operand: Box::new(operand),
        }
    }

    pub fn literal(value: Value) -> Self {
        PredicateNode::Literal(value)
    }

    /// Field names referenced anywhere in the tree, first occurrence order,
    /// without duplicates. Field-to-field comparisons contribute both sides.
    pub fn fields(&self) -> Vec<&Identifier> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a Identifier>) {
        match self {
            PredicateNode::Comparison { field, rhs, .. } => {
                if !out.contains(&field) {
                    out.push(field);
                }
                if let Operand::Field(other) = rhs
                    && !out.contains(&other)
                {
                    out.push(other);
                }
            }
            PredicateNode::And { left, right } | PredicateNode::Or { left, right } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            PredicateNode::Not { operand } => operand.collect_fields(out),
            PredicateNode::Literal(_) => {}
        }
    }

    /// Height of the tree; a single comparison or literal is 1.
    pub fn depth(&self) -> usize {
        match self {
            PredicateNode::Comparison { .. } | PredicateNode::Literal(_) => 1,
            PredicateNode::And { left, right } | PredicateNode::Or { left, right } => {
                1 + left.depth().max(right.depth())
            }
            PredicateNode::Not { operand } => 1 + operand.depth(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            PredicateNode::Or { .. } => 1,
            PredicateNode::And { .. } => 2,
            PredicateNode::Not { .. } => 3,
            PredicateNode::Comparison { .. } | PredicateNode::Literal(_) => 4,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            f.write_str("(")?;
            self.fmt_at(f, 0)?;
            return f.write_str(")");
        }

        match self {
            PredicateNode::Comparison {
                field,
                operator,
                rhs,
            } => write!(f, "{field}{operator}{rhs}"),
            // Operands mirror the grammar: the left side binds one level
            // tighter, the right side may repeat the same operator.
            PredicateNode::Or { left, right } => {
                left.fmt_at(f, 2)?;
                f.write_str("|")?;
                right.fmt_at(f, 1)
            }
            PredicateNode::And { left, right } => {
                left.fmt_at(f, 3)?;
                f.write_str("&")?;
                right.fmt_at(f, 2)
            }
            PredicateNode::Not { operand } => {
                f.write_str("!")?;
                operand.fmt_at(f, 4)
            }
            PredicateNode::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// Canonical filter text. Parsing the output yields an equal tree.
impl fmt::Display for PredicateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

impl FromStr for PredicateNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}
