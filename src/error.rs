//! Error types for expression parsing and aggregation flattening.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while tokenizing or parsing an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The expression contains no sub-expressions.
    #[error("empty expression")]
    EmptyExpression,

    /// A `[` was never closed, or a `]` has no matching `[`.
    #[error("unbalanced bracket at position {position}")]
    UnbalancedBracket {
        /// Character offset of the offending bracket.
        position: usize,
    },

    /// The type prefix before `:` is not a known keyword.
    #[error("unknown aggregation type '{keyword}'")]
    UnknownType { keyword: String },

    /// The name path is empty or contains an empty or invalid segment.
    #[error("invalid name '{name}' in '{token}'")]
    InvalidName { token: String, name: String },

    /// The token does not have the `[type:]name[[expression]]` shape.
    #[error("malformed sub-expression '{token}': {reason}")]
    Malformed { token: String, reason: String },
}

/// A dotted path could not be resolved against an aggregation node.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("no aggregation found at '{path}'")]
pub struct LookupError {
    /// The dotted path that was requested.
    pub path: String,
    /// The raw node the path was resolved against.
    pub node: Value,
}

/// Errors surfaced by the public flattening API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggError {
    /// A requested field is missing from the aggregation tree.
    ///
    /// `at` is the outermost name (or full expression) being computed and
    /// `body` is the top-level raw tree the computation started from.
    #[error("error parsing aggregation at: {at}")]
    Parse { at: String, body: Value },

    /// Internal lookup failure, rewrapped as [`AggError::Parse`] before it
    /// leaves a public accessor.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The expression is not well-formed.
    #[error("invalid expression: {0}")]
    Syntax(#[from] SyntaxError),

    /// A section expected in a search response is missing or has the wrong shape.
    #[error("search response has no usable '{section}' section")]
    Response { section: String },

    /// The search response was not valid JSON.
    #[error("invalid JSON response: {0}")]
    Json(String),
}

impl AggError {
    /// The path or expression the error points at, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            AggError::Parse { at, .. } => Some(at),
            AggError::Lookup(e) => Some(&e.path),
            _ => None,
        }
    }

    /// The raw tree attached for debugging, when there is one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            AggError::Parse { body, .. } => Some(body),
            AggError::Lookup(e) => Some(&e.node),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AggError {
    fn from(e: serde_json::Error) -> Self {
        AggError::Json(e.to_string())
    }
}

/// Result type for flattening operations.
pub type AggResult<T> = std::result::Result<T, AggError>;
