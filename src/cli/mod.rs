//! CLI support for where-lang
//!
//! Provides programmatic access to the `where-lang` CLI so other tools can embed
//! filter validation.

mod check;
mod docs;

pub use check::{
    CheckOptions, CheckResult, OutputFormat, execute_check, execute_tokens, format_tokens,
};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parse error, reported with its category and offset
    #[error(
        "{category} error at offset {offset}: {reason}",
        category = .0.category(),
        offset = .0.offset(),
        reason = .0.reason()
    )]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown topic: '{0}'\nRun 'where-lang docs' to see available topics.")]
    UnknownTopic(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Parse(e.into())
    }
}
