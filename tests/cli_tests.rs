use agglens::cli::{
    CliError, DocCategory, FlattenOptions, FlattenResult, OutputFormat, describe_expression,
    execute_flatten, get_doc_category, render,
};
use agglens::{AggError, SyntaxError};
use serde_json::json;

const RESPONSE: &str = r#"{
    "hits": {"total": 2, "hits": []},
    "aggregations": {
        "name": {"buckets": [
            {"key": "Alice", "doc_count": 300, "rate": {"value": 0.5}},
            {"key": "Bob", "doc_count": 200, "rate": {"value": 0.25}}
        ]},
        "rates": {"values": {"25": 0.2, "50": 0.45}}
    }
}"#;

fn options(expression: &str) -> FlattenOptions {
    FlattenOptions {
        expression: expression.to_string(),
        input: Some(RESPONSE.to_string()),
        ..FlattenOptions::default()
    }
}

fn flatten(options: &FlattenOptions) -> serde_json::Value {
    match execute_flatten(options).unwrap() {
        FlattenResult::Success(value) => value,
        FlattenResult::SyntaxValid => panic!("Expected a flattened value"),
    }
}

#[test]
fn test_flatten_search_response() {
    let value = flatten(&options("name[rate]"));
    assert_eq!(
        value,
        json!({"names": [
            {"name": "Alice", "count": 300, "rate": 0.5},
            {"name": "Bob", "count": 200, "rate": 0.25}
        ]})
    );
}

#[test]
fn test_flatten_raw_aggregations() {
    let opts = FlattenOptions {
        input: Some(r#"{"rate": {"value": 0.85}}"#.to_string()),
        raw: true,
        ..options("rate")
    };
    assert_eq!(flatten(&opts), json!({"rate": 0.85}));
}

#[test]
fn test_flatten_options() {
    let opts = FlattenOptions {
        count_field: Some("clicks".to_string()),
        as_array: true,
        ..options("terms:name multiValue:rates")
    };
    assert_eq!(
        flatten(&opts),
        json!({
            "names": [{"name": "Alice", "clicks": 300}, {"name": "Bob", "clicks": 200}],
            "rates": [{"key": "25", "value": 0.2}, {"key": "50", "value": 0.45}]
        })
    );
}

#[test]
fn test_syntax_only_needs_no_input() {
    let opts = FlattenOptions {
        expression: "terms:name[rate]".to_string(),
        syntax_only: true,
        ..FlattenOptions::default()
    };
    assert!(matches!(execute_flatten(&opts), Ok(FlattenResult::SyntaxValid)));
}

#[test]
fn test_errors() {
    let no_input = FlattenOptions {
        expression: "rate".to_string(),
        ..FlattenOptions::default()
    };
    assert!(matches!(execute_flatten(&no_input), Err(CliError::NoInput)));

    let bad_json = FlattenOptions {
        input: Some("{".to_string()),
        ..options("rate")
    };
    assert!(matches!(execute_flatten(&bad_json), Err(CliError::Json(_))));

    assert!(matches!(
        execute_flatten(&options("name[rate")),
        Err(CliError::Agg(AggError::Syntax(SyntaxError::UnbalancedBracket { .. })))
    ));

    let missing = execute_flatten(&options("count:missing")).unwrap_err();
    assert_eq!(missing.to_string(), "error parsing aggregation at: count:missing");
}

#[test]
fn test_render_formats() {
    let value = json!({"names": [{"name": "Alice"}, {"name": "Bob"}]});

    assert_eq!(
        render(&value, OutputFormat::Compact),
        r#"{"names":[{"name":"Alice"},{"name":"Bob"}]}"#
    );
    assert_eq!(
        render(&value, OutputFormat::NdJson),
        "{\"name\":\"Alice\"}\n{\"name\":\"Bob\"}"
    );
    assert!(render(&value, OutputFormat::Pretty).starts_with("{\n  \"names\": ["));
}

#[test]
fn test_describe_expression() {
    let tree = describe_expression("terms:name[rate nested:transactions[filter.count]]").unwrap();
    assert_eq!(
        tree,
        "terms name\n  value rate\n  nested transactions\n    value filter.count\n"
    );
    assert!(describe_expression("name[").is_err());
}

#[test]
fn test_docs() {
    assert_eq!(DocCategory::from_str("Scopes"), Some(DocCategory::Scopes));
    assert!(get_doc_category("syntax").unwrap().contains("expression :="));
    assert!(matches!(
        get_doc_category("nope"),
        Err(CliError::UnknownCategory(_))
    ));
}
