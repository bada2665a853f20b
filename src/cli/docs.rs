//! Documentation content for the `where-lang` CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Grammar,
    Operators,
    Values,
    Errors,
}

impl DocTopic {
    pub const ALL: [DocTopic; 4] = [
        DocTopic::Grammar,
        DocTopic::Operators,
        DocTopic::Values,
        DocTopic::Errors,
    ];

    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grammar" | "syntax" => Some(Self::Grammar),
            "operators" | "ops" => Some(Self::Operators),
            "values" | "literals" => Some(Self::Values),
            "errors" => Some(Self::Errors),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocTopic::Grammar => "grammar",
            DocTopic::Operators => "operators",
            DocTopic::Values => "values",
            DocTopic::Errors => "errors",
        }
    }

    pub fn content(self) -> &'static str {
        match self {
            DocTopic::Grammar => GRAMMAR_DOC,
            DocTopic::Operators => OPERATORS_DOC,
            DocTopic::Values => VALUES_DOC,
            DocTopic::Errors => ERRORS_DOC,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"WHERE FILTER DOCUMENTATION

A where filter is a boolean predicate over named fields, usually passed in a
URL query parameter. It is parsed into a predicate tree that a query layer
turns into a native filter.

DOCUMENTATION TOPICS

  grammar     Expression structure, precedence and grouping
  operators   Comparison and logical operators
  values      Literal syntax: strings, numbers, arrays, objects
  errors      Error categories and offsets

QUICK REFERENCE

  age>=18                 Compare a field to a constant
  start<end               Compare two fields
  name~*"john"            Case-insensitive pattern match
  status@["A","B"]        Membership
  a=1&b=2 | c=3           AND binds tighter than OR
  !(a=1&b=2)              Negate a group

Run 'where-lang doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    DocTopic::from_name(name)
        .map(DocTopic::content)
        .ok_or_else(|| CliError::UnknownTopic(name.to_string()))
}

const GRAMMAR_DOC: &str = r#"GRAMMAR - Expression Structure

  expr           := or
  or             := and_or_tighter ('|' or)?
  and_or_tighter := not_or_tighter ('&' and_or_tighter)?
  not_or_tighter := '!' atom | atom
  atom           := '(' expr ')' | comparison | value
  comparison     := IDENT op (IDENT | value | '(' rhs ')')

PRECEDENCE (loosest to tightest)
  |     OR
  &     AND
  !     NOT, applies to one atom

  Examples:
    a=1|b=2&c=3       a=1 | (b=2 & c=3)
    !a=1&b=2          (!a=1) & b=2
    !(a=1&b=2)        negates the whole group

CHAINING
  Three or more terms joined by the same operator nest to the right:
    a=1&b=2&c=3       a=1 & (b=2 & c=3)

FIELDS
  Field names start with a letter or underscore and continue with letters,
  digits or underscores. An identifier on the right-hand side of a
  comparison is another field:
    start_date<end_date

WHITESPACE
  Whitespace between tokens is ignored:
    age >= 18 & name ~* "jo"

LIMITS
  Input length, nesting depth and the number of terms are bounded (see
  --max-length, --max-depth and --max-terms). Nesting counts groups,
  negations, and each level of array or object literal. Every comparison
  or bare literal is one term, however long the '&' or '|' chain.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison and Logical

COMPARISON OPERATORS
  =     Equal
  !=    Not equal
  >     Greater than
  >=    Greater than or equal
  <     Less than
  <=    Less than or equal
  ~     Pattern match (case-sensitive)
  ~*    Pattern match (case-insensitive)
  #     Contains (collection field holds the value)
  @     In (field value is one of the given set)

  Examples:
    age>=18
    deleted_at=null
    name~"Jo%"
    email~*"%@example.com"
    tags#"rust"
    status@["open","pending"]

  Longest match wins when symbols share a prefix:
    ~* before ~, >= before >, <= before <, != before !

LOGICAL OPERATORS
  &     AND
  |     OR
  !     NOT
  ()    Grouping
"#;

const VALUES_DOC: &str = r#"VALUES - Literal Syntax

  null
  true, false
  42, -7, 3.25, 1e-3            numbers keep exact decimal precision
  "text"                        escapes: \" \\ \/ \b \f \n \r \t \uXXXX
  [1, "two", null]              arrays keep element order
  {"key": "value", "n": 1}      object keys must be quoted strings

  Repeated object keys keep the last value:
    {"a": 1, "a": 2}            same as {"a": 2}

  Trailing commas are rejected:
    [1, 2,]                     syntax error

  A bare value is also a complete expression:
    true
"#;

const ERRORS_DOC: &str = r#"ERRORS - Categories and Offsets

Every error reports a category and the byte offset where parsing stopped.

  lex       A character or literal that can't be read
              a=$               unexpected character '$' at offset 2
              a="open           unterminated string starting at offset 2
              a="\q"            invalid escape sequence '\q' at offset 3
              a=1.              malformed number '1.' at offset 2

  syntax    A valid token in the wrong place
              a=                expected field or value, found end of input
              a=(1              expected ')', found end of input at offset 4
              a=1 b=2           expected end of input, found identifier 'b'
              a={1:2}           expected string key, found number 1

  limit     Input too long, nested too deep, or too many terms

The first error stops the parse; no partial result is produced.
"#;
