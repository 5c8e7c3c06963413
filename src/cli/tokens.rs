//! Show how an expression is parsed

use crate::{Expression, SyntaxError, parse_expression};

/// Renders the parsed sub-expression tree, one sub-expression per line.
///
/// ```text
/// terms name
///   value transaction_count
///   nested transactions
/// ```
pub fn describe_expression(expression: &str) -> Result<String, SyntaxError> {
    let parsed = parse_expression(expression)?;
    let mut out = String::new();
    describe(&parsed, 0, &mut out);
    Ok(out)
}

fn describe(expression: &Expression, depth: usize, out: &mut String) {
    for sub_agg in expression.sub_aggs() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(sub_agg.agg_type.keyword());
        out.push(' ');
        out.push_str(&sub_agg.path());
        out.push('\n');

        if let Some(nested) = &sub_agg.nested {
            describe(nested, depth + 1, out);
        }
    }
}
