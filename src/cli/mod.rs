//! CLI support for agglens
//!
//! Provides programmatic access to the `agglens` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod docs;
mod flatten;
mod tokens;

pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use flatten::{FlattenOptions, FlattenResult, OutputFormat, execute_flatten, render};
pub use tokens::describe_expression;

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Expression or lookup error
    #[error("{0}")]
    Agg(#[from] crate::AggError),
    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'agglens docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::SyntaxError> for CliError {
    fn from(e: crate::SyntaxError) -> Self {
        CliError::Agg(e.into())
    }
}
