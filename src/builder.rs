//! The seam between the parser and whatever turns a predicate tree into a
//! real query.
//!
//! A storage layer implements [`QueryBuilder`] once and calls
//! [`PredicateNode::build`] on each parsed filter. The tree is walked
//! bottom-up: children are built first and their outputs handed to the
//! parent's method, so a builder never sees a half-translated node.

use crate::ast::{Identifier, OperatorKind, Operand, PredicateNode};
use crate::value::Value;

/// Translates predicate nodes into a native filter representation.
///
/// What an operator means is the builder's call. A SQL builder will likely
/// turn `field=null` into `field IS NULL`, `~` into `LIKE` and `@` into `IN`.
/// Returning an error (unknown column, `@` with a non-array value) aborts the
/// whole build.
///
/// # Examples
///
/// ```
/// use where_lang::builder::QueryBuilder;
/// use where_lang::ast::{Identifier, OperatorKind, Operand};
/// use where_lang::value::Value;
///
/// struct FieldCounter;
///
/// impl QueryBuilder for FieldCounter {
///     type Output = usize;
///     type Error = std::convert::Infallible;
///
///     fn comparison(&mut self, _: &Identifier, _: OperatorKind, rhs: &Operand) -> Result<usize, Self::Error> {
///         Ok(if matches!(rhs, Operand::Field(_)) { 2 } else { 1 })
///     }
///     fn and(&mut self, l: usize, r: usize) -> Result<usize, Self::Error> { Ok(l + r) }
///     fn or(&mut self, l: usize, r: usize) -> Result<usize, Self::Error> { Ok(l + r) }
///     fn not(&mut self, o: usize) -> Result<usize, Self::Error> { Ok(o) }
///     fn literal(&mut self, _: &Value) -> Result<usize, Self::Error> { Ok(0) }
/// }
///
/// let tree = where_lang::parse("a=1&(b<c|!d=null)").unwrap();
/// assert_eq!(tree.build(&mut FieldCounter), Ok(4));
/// ```
pub trait QueryBuilder {
    type Output;
    type Error;

    fn comparison(
        &mut self,
        field: &Identifier,
        operator: OperatorKind,
        rhs: &Operand,
    ) -> Result<Self::Output, Self::Error>;

    fn and(&mut self, left: Self::Output, right: Self::Output) -> Result<Self::Output, Self::Error>;

    fn or(&mut self, left: Self::Output, right: Self::Output) -> Result<Self::Output, Self::Error>;

    fn not(&mut self, operand: Self::Output) -> Result<Self::Output, Self::Error>;

    /// A bare literal atom such as `true`.
    fn literal(&mut self, value: &Value) -> Result<Self::Output, Self::Error>;
}

impl PredicateNode {
    /// Translate the tree with `builder`, children first.
    pub fn build<B>(&self, builder: &mut B) -> Result<B::Output, B::Error>
    where
        B: QueryBuilder + ?Sized,
    {
        match self {
            PredicateNode::Comparison {
                field,
                operator,
                rhs,
            } => builder.comparison(field, *operator, rhs),
            PredicateNode::And { left, right } => {
                let left = left.build(builder)?;
                let right = right.build(builder)?;
                builder.and(left, right)
            }
            PredicateNode::Or { left, right } => {
                let left = left.build(builder)?;
                let right = right.build(builder)?;
                builder.or(left, right)
            }
            PredicateNode::Not { operand } => {
                let operand = operand.build(builder)?;
                builder.not(operand)
            }
            PredicateNode::Literal(value) => builder.literal(value),
        }
    }
}
