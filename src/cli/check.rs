//! Validate filter expressions and list their tokens

use super::CliError;
use crate::output::to_json;
use crate::{Lexer, Limits, Token, parse_with_limits};

/// How `check` reports a valid expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Just confirm the syntax is valid
    #[default]
    Summary,
    /// The predicate tree as JSON
    Json,
    /// The predicate tree as canonical filter text
    Canonical,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression to parse
    pub expression: String,
    /// What to print on success
    pub format: OutputFormat,
    /// Parse limits
    pub limits: Limits,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Parsed tree as JSON
    Tree(serde_json::Value),
    /// Parsed tree rendered back to filter text
    Canonical(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tree = parse_with_limits(&options.expression, &options.limits)?;

    Ok(match options.format {
        OutputFormat::Summary => CheckResult::SyntaxValid,
        OutputFormat::Json => CheckResult::Tree(to_json(&tree)),
        OutputFormat::Canonical => CheckResult::Canonical(tree.to_string()),
    })
}

/// Lex an expression and return every token, ending with end-of-input.
pub fn execute_tokens(expression: &str) -> Result<Vec<Token>, CliError> {
    Ok(Lexer::new(expression).tokenize()?)
}

/// One line per token: offset, kind, raw text.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:>4}  {:<10}  {}", t.offset, t.kind.name(), t.text))
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
