//! # Where Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the predicate tree for the `where`
//! filter language, a compact grammar for boolean predicates over named
//! fields, typically passed in a URL query parameter.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators (`=`, `~*`, `@`, ...)
//! - **[predicate]** - The predicate tree handed to query builders
//!
//! ## Quick Start
//!
//! ```text
//! (status@["open","pending"]&age>=18)|!name~*"bot"
//! ```
//!
//! This filter keeps records that are open or pending and at least 18, or
//! whose name doesn't match `bot` case-insensitively.
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! From loosest to tightest: `|` (OR), `&` (AND), `!` (NOT), then atoms.
//! `!` applies to a single atom, so `!a=1&b=2` negates only `a=1`.
//!
//! ### Atoms
//!
//! - **Comparison** `field op rhs` - `rhs` is a field name or a literal
//! - **Group** `( expr )`
//! - **Literal** a bare value such as `true`
//!
//! ### Field vs. Constant
//!
//! An identifier on the right of a comparison is another field:
//! `start<end` compares two columns, `start<"end"` compares to a string.
//!
//! ## Examples
//!
//! ```text
//! age>=18
//! name~*"john"
//! tags#"rust"
//! status@["A","B"]
//! (a=1&b=2)|c=3
//! deleted_at=null
//! ```
pub mod operators;
pub mod predicate;
pub mod tokens;

pub use operators::OperatorKind;
pub use predicate::{Identifier, Operand, PredicateNode};
pub use tokens::{Token, TokenKind};
