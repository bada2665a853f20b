pub mod ast;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod limits;
pub mod output;
pub mod parser;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Identifier, OperatorKind, Operand, PredicateNode, Token, TokenKind};
pub use builder::QueryBuilder;
pub use error::{ErrorCategory, IdentifierError, LexError, ParseError, ParseResult, SyntaxError};
pub use lexer::Lexer;
pub use limits::Limits;
pub use output::{to_json, to_json_pretty, to_json_string};
pub use parser::{Parser, parse, parse_with_limits};
pub use value::{Number, Value};
