//! JSON view of predicate trees.
//!
//! Used by the CLI and handy for logging or shipping a parsed filter to a
//! service that doesn't link this crate. The shape is:
//!
//! ```text
//! {"type": "comparison", "field": "age", "operator": "ge", "rhs": {"value": 18}}
//! {"type": "comparison", "field": "start", "operator": "lt", "rhs": {"field": "end"}}
//! {"type": "and" | "or", "left": {...}, "right": {...}}
//! {"type": "not", "operand": {...}}
//! {"type": "literal", "value": true}
//! ```
//!
//! # Examples
//!
//! ```
//! use where_lang::output::to_json_string;
//!
//! let tree = where_lang::parse("!a=1").unwrap();
//! assert_eq!(
//!     to_json_string(&tree),
//!     r#"{"operand":{"field":"a","operator":"eq","rhs":{"value":1},"type":"comparison"},"type":"not"}"#
//! );
//! ```

use crate::ast::{Operand, PredicateNode};
use crate::value::{Number, Value};
use serde_json::json;

/// Convert a predicate tree to a `serde_json::Value`.
pub fn to_json(node: &PredicateNode) -> serde_json::Value {
    match node {
        PredicateNode::Comparison {
            field,
            operator,
            rhs,
        } => json!({
            "type": "comparison",
            "field": field.as_str(),
            "operator": operator.name(),
            "rhs": operand_to_json(rhs),
        }),
        PredicateNode::And { left, right } => json!({
            "type": "and",
            "left": to_json(left),
            "right": to_json(right),
        }),
        PredicateNode::Or { left, right } => json!({
            "type": "or",
            "left": to_json(left),
            "right": to_json(right),
        }),
        PredicateNode::Not { operand } => json!({
            "type": "not",
            "operand": to_json(operand),
        }),
        PredicateNode::Literal(value) => json!({
            "type": "literal",
            "value": value_to_json(value),
        }),
    }
}

fn operand_to_json(operand: &Operand) -> serde_json::Value {
    match operand {
        Operand::Field(name) => json!({ "field": name.as_str() }),
        Operand::Value(value) => json!({ "value": value_to_json(value) }),
    }
}

/// Convert a literal to JSON.
///
/// Decimals go through their exact text so `0.1` stays `0.1`. Numbers JSON
/// can't represent become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(Number::Integer(n)) => serde_json::Value::Number((*n).into()),
        Value::Number(Number::Decimal(d)) => d
            .to_string()
            .parse::<serde_json::Number>()
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Compact JSON text. Object keys come out sorted.
pub fn to_json_string(node: &PredicateNode) -> String {
    to_json(node).to_string()
}

/// JSON text with two-space indentation.
pub fn to_json_pretty(node: &PredicateNode) -> String {
    format!("{:#}", to_json(node))
}
