// tests/parser_tests.rs

use agglens::ast::{AggType, Shape};
use agglens::error::SyntaxError;
use agglens::parser::{Parser, parse_expression, parse_sub_agg};

// ============================================================================
// Sub-expressions
// ============================================================================

#[test]
fn test_bare_name_defaults_to_value() {
    let sub = parse_sub_agg("rate").unwrap();
    assert_eq!(sub.agg_type, AggType::Value);
    assert_eq!(sub.name_prefix, "");
    assert_eq!(sub.name, "rate");
    assert!(sub.nested.is_none());
}

#[test]
fn test_type_prefix() {
    let test_cases = vec![
        ("count:x", AggType::Count),
        ("filter:x", AggType::Filter),
        ("nested:x", AggType::Nested),
        ("value:x", AggType::Value),
        ("avg:x", AggType::Avg),
        ("sum:x", AggType::Sum),
        ("max:x", AggType::Max),
        ("min:x", AggType::Min),
        ("terms:x", AggType::Terms),
        ("histogram:x", AggType::Histogram),
        ("ranges:x", AggType::Ranges),
        ("geohashGrid:x", AggType::GeohashGrid),
        ("multiCount:x", AggType::MultiCount),
        ("percentiles:x", AggType::Percentiles),
        ("multiValue:x", AggType::MultiValue),
    ];

    for (input, expected) in test_cases {
        let sub = parse_sub_agg(input).unwrap();
        assert_eq!(sub.agg_type, expected, "Failed for input: {}", input);
        assert_eq!(sub.name, "x");
    }
}

#[test]
fn test_shapes() {
    assert_eq!(AggType::Nested.shape(), Shape::Count);
    assert_eq!(AggType::Max.shape(), Shape::Value);
    assert_eq!(AggType::GeohashGrid.shape(), Shape::Buckets);
    assert_eq!(AggType::Percentiles.shape(), Shape::MultiValue);
}

#[test]
fn test_dotted_name_splits_prefix() {
    let sub = parse_sub_agg("value:filter.nested.rate").unwrap();
    assert_eq!(sub.name_prefix, "filter.nested");
    assert_eq!(sub.name, "rate");
    assert_eq!(sub.path(), "filter.nested.rate");
}

#[test]
fn test_nested_expression() {
    let sub = parse_sub_agg("terms:name[transaction_count nested:transactions]").unwrap();
    assert_eq!(sub.agg_type, AggType::Terms);
    assert_eq!(sub.name, "name");

    let nested = sub.nested.expect("nested expression");
    assert_eq!(nested.source(), "transaction_count nested:transactions");
    assert_eq!(nested.sub_aggs().len(), 2);
    assert_eq!(nested.sub_aggs()[1].agg_type, AggType::Nested);
    assert_eq!(nested.sub_aggs()[1].name, "transactions");
}

#[test]
fn test_colon_inside_brackets_is_not_a_type() {
    let sub = parse_sub_agg("name[count:transactions]").unwrap();
    assert_eq!(sub.agg_type, AggType::Value);
    assert_eq!(sub.name, "name");
    let nested = sub.nested.unwrap();
    assert_eq!(nested.sub_aggs()[0].agg_type, AggType::Count);
}

#[test]
fn test_deeply_nested_expression() {
    let expr = parse_expression("a[b[c[d]]]").unwrap();
    let a = &expr.sub_aggs()[0];
    let b = &a.nested.as_ref().unwrap().sub_aggs()[0];
    let c = &b.nested.as_ref().unwrap().sub_aggs()[0];
    let d = &c.nested.as_ref().unwrap().sub_aggs()[0];

    assert_eq!(
        (a.name.as_str(), b.name.as_str(), c.name.as_str(), d.name.as_str()),
        ("a", "b", "c", "d")
    );
    assert!(d.nested.is_none());
}

#[test]
fn test_parser_keeps_source() {
    let expr = Parser::new("  rate terms:name[x] ").parse().unwrap();
    assert_eq!(expr.source(), "rate terms:name[x]");
    assert_eq!(expr.to_string(), "rate terms:name[x]");
    assert_eq!(expr.sub_aggs().len(), 2);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_unknown_type() {
    assert_eq!(
        parse_sub_agg("median:latency"),
        Err(SyntaxError::UnknownType {
            keyword: "median".to_string()
        })
    );
}

#[test]
fn test_type_keywords_are_case_sensitive() {
    assert!(matches!(
        parse_sub_agg("Terms:name"),
        Err(SyntaxError::UnknownType { .. })
    ));
}

#[test]
fn test_invalid_names() {
    for input in ["terms:", "terms:[rate]", "a..b", ".a", "a.", "[rate]"] {
        assert!(
            matches!(parse_sub_agg(input), Err(SyntaxError::InvalidName { .. })),
            "Expected invalid name for input: {}",
            input
        );
    }
}

#[test]
fn test_malformed_type_prefix() {
    assert!(matches!(
        parse_sub_agg(":rate"),
        Err(SyntaxError::Malformed { .. })
    ));
    assert!(matches!(
        parse_sub_agg("count:b:c"),
        Err(SyntaxError::InvalidName { .. })
    ));
}

#[test]
fn test_text_after_bracket() {
    assert!(matches!(
        parse_sub_agg("name[rate]x"),
        Err(SyntaxError::Malformed { .. })
    ));
    assert!(matches!(
        parse_sub_agg("name[a][b]"),
        Err(SyntaxError::Malformed { .. })
    ));
}

#[test]
fn test_empty_brackets() {
    assert_eq!(parse_sub_agg("name[]"), Err(SyntaxError::EmptyExpression));
    assert_eq!(parse_sub_agg("name[ ]"), Err(SyntaxError::EmptyExpression));
}

#[test]
fn test_unbalanced_token() {
    assert!(matches!(
        parse_sub_agg("name[rate"),
        Err(SyntaxError::UnbalancedBracket { position: 4 })
    ));
}

#[test]
fn test_errors_in_nested_expressions_surface() {
    assert!(matches!(
        parse_expression("terms:name[median:x]"),
        Err(SyntaxError::UnknownType { .. })
    ));
}
