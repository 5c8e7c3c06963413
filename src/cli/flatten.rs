//! Flatten aggregation results from JSON input

use serde_json::Value;

use super::CliError;
use crate::{AccessOptions, Flattener, SearchResponse, output, parse_expression};

/// How a successful result is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
    NdJson,
}

/// Options for the flatten command
#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON input string
    pub input: Option<String>,
    /// Treat the input as the aggregation tree instead of a search response
    pub raw: bool,
    /// Only validate the expression, don't evaluate
    pub syntax_only: bool,
    /// Name of the per-bucket count field
    pub count_field: Option<String>,
    /// Emit percentiles and multi-value results as key/value lists
    pub as_array: bool,
}

/// Result of a flatten operation
#[derive(Debug)]
pub enum FlattenResult {
    /// Expression is well-formed
    SyntaxValid,
    /// Expression evaluated successfully
    Success(Value),
}

/// Execute a flatten operation
pub fn execute_flatten(options: &FlattenOptions) -> Result<FlattenResult, CliError> {
    let expression = parse_expression(&options.expression)?;

    if options.syntax_only {
        return Ok(FlattenResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: Value = serde_json::from_str(json_str)?;

    let access = AccessOptions {
        with: None,
        doc_count: options.count_field.clone(),
        as_array: options.as_array,
    };

    let output = if options.raw {
        Flattener::new(&document).evaluate(&expression, &access)?
    } else {
        let response = SearchResponse::new(document);
        let flat = response.aggregations()?.evaluate(&expression, &access)?;
        flat
    };

    Ok(FlattenResult::Success(output))
}

/// Render a flattened value in the requested format
pub fn render(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Compact => output::to_json(value),
        OutputFormat::Pretty => output::to_json_pretty(value),
        OutputFormat::NdJson => output::to_ndjson(value).trim_end().to_string(),
    }
}
