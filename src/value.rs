use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::collections::HashMap;
use std::fmt;

/// A numeric literal as written in a filter expression.
///
/// Integers that fit in an `i64` stay integers. Anything with a fraction or
/// an exponent is kept as an exact [`Decimal`] so that `price=19.99` reaches
/// the query layer without binary floating-point drift. Fractional or
/// exponent literals too large or too precise for a decimal fall back to
/// `f64`; whole numbers beyond decimal range are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Whole number within `i64` range
    Integer(i64),

    /// Exact decimal (up to 28 fractional digits)
    Decimal(Decimal),

    /// Floating-point fallback for literals a decimal can't hold
    Float(f64),
}

impl Number {
    /// Parse the text of a numeric literal.
    ///
    /// Returns `None` when the text isn't a finite number, or is a whole
    /// number too large to hold exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use where_lang::value::Number;
    ///
    /// assert_eq!(Number::parse("42"), Some(Number::Integer(42)));
    /// assert_eq!(Number::parse("-7"), Some(Number::Integer(-7)));
    /// assert!(matches!(Number::parse("19.99"), Some(Number::Decimal(_))));
    /// assert_eq!(Number::parse("1e3"), Some(Number::Integer(1000)));
    /// assert_eq!(Number::parse("abc"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Number> {
        let has_exponent = text.contains(['e', 'E']);
        let has_fraction = text.contains('.');

        if !has_exponent && !has_fraction {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::Integer(n));
            }
            // Whole numbers are never rounded; one a decimal can't hold is
            // rejected.
            return Decimal::from_str_exact(text).ok().map(Number::Decimal);
        } else if !has_exponent {
            if let Ok(d) = Decimal::from_str_exact(text) {
                return Some(Number::Decimal(d));
            }
        } else if let Ok(d) = Decimal::from_scientific(text) {
            return Some(Self::from_decimal(d));
        }

        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Number::Float)
    }

    // Scientific literals with no fractional part read back as integers.
    fn from_decimal(d: Decimal) -> Number {
        if d.scale() == 0 {
            if let Some(n) = d.to_i64() {
                return Number::Integer(n);
            }
        }
        Number::Decimal(d)
    }

    /// Whether the number is below zero
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => *n < 0,
            Number::Decimal(d) => d.is_sign_negative() && !d.is_zero(),
            Number::Float(f) => *f < 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Decimal(d) => write!(f, "{d}"),
            Number::Float(n) => write!(f, "{n}"),
        }
    }
}

/// A literal value appearing in a filter expression.
///
/// Values are the right-hand side of comparisons (`status@["A","B"]`) or
/// stand alone as bare literals (`true`).
///
/// # Examples
///
/// ```
/// use where_lang::value::{Number, Value};
/// use std::collections::HashMap;
///
/// let tags = Value::Array(vec![
///     Value::String("rust".to_string()),
///     Value::Number(Number::Integer(2)),
/// ]);
/// assert_eq!(tags.to_string(), r#"["rust",2]"#);
///
/// let mut obj = HashMap::new();
/// obj.insert("k".to_string(), Value::Null);
/// assert_eq!(Value::Object(obj).to_string(), r#"{"k":null}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,

    /// `true` / `false`
    Bool(bool),

    /// Signed integer or decimal literal
    Number(Number),

    /// Double-quoted string, escapes already resolved
    String(String),

    /// `[...]`, order preserved
    Array(Vec<Value>),

    /// `{"key": value, ...}`; a repeated key keeps the last value
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Nesting depth of the literal: scalars are 0, `[1]` is 1, `[[1]]` is 2.
    pub fn depth(&self) -> usize {
        match self {
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Object(map) => 1 + map.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Renders the value as filter-expression literal text.
///
/// Object keys are sorted so output is deterministic.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();

                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{}\":{}", escape_string(key), map[key])?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Escape a string for a double-quoted literal.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn integer_overflow_becomes_decimal() {
        let n = Number::parse("99999999999999999999").unwrap();
        assert_eq!(
            n,
            Number::Decimal(Decimal::from_str("99999999999999999999").unwrap())
        );
    }

    #[test]
    fn decimal_keeps_scale() {
        let n = Number::parse("1.50").unwrap();
        assert_eq!(n.to_string(), "1.50");
    }

    #[test]
    fn negative_exponent_is_exact() {
        let n = Number::parse("-2e-3").unwrap();
        assert_eq!(n, Number::Decimal(Decimal::from_str("-0.002").unwrap()));
        assert!(n.is_negative());
    }

    #[test]
    fn huge_exponent_falls_back_to_float() {
        assert!(matches!(Number::parse("1e300"), Some(Number::Float(_))));
        assert_eq!(Number::parse("1e999"), None);
    }

    #[test]
    fn whole_number_beyond_decimal_range_is_rejected() {
        assert_eq!(Number::parse("99999999999999999999999999999999"), None);
        assert_eq!(Number::parse("-99999999999999999999999999999999"), None);
        assert!(matches!(
            Number::parse("79228162514264337593543950335"),
            Some(Number::Decimal(_))
        ));
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_string("a\"b\\c\n\u{1}"), "a\\\"b\\\\c\\n\\u0001");
    }

    #[test]
    fn depth_counts_nested_collections() {
        let v = Value::Array(vec![Value::Array(vec![Value::Null]), Value::Bool(true)]);
        assert_eq!(v.depth(), 2);
        assert_eq!(Value::Null.depth(), 0);
    }
}
