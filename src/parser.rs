use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{AggType, Expression, SubAgg},
    error::SyntaxError,
    lexer::tokenize,
};

static TYPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+):(.*)$").expect("valid type prefix pattern"));

static NAME_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^.\s:\[\]]+(?:\.[^.\s:\[\]]+)*$").expect("valid name path pattern")
});

/// Parses an expression string into its sub-expression tree.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input }
    }

    /// Parse the whole input, nested brackets included.
    pub fn parse(&self) -> Result<Expression, SyntaxError> {
        let sub_aggs = tokenize(self.input)?
            .iter()
            .map(String::as_str)
            .map(parse_sub_agg)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Expression::new(self.input.trim(), sub_aggs))
    }
}

/// Parses a full expression.
pub fn parse_expression(expression: &str) -> Result<Expression, SyntaxError> {
    Parser::new(expression).parse()
}

/// Parses one token of the form `[type:]name.path[[nested expression]]`.
pub fn parse_sub_agg(token: &str) -> Result<SubAgg, SyntaxError> {
    let (head, nested) = match token.find('[') {
        Some(open) => (&token[..open], Some(bracket_body(token, open)?)),
        None => (token, None),
    };

    let (agg_type, path) = if head.contains(':') {
        let caps = TYPE_PREFIX
            .captures(head)
            .ok_or_else(|| SyntaxError::Malformed {
                token: token.to_string(),
                reason: "expected 'type:name'".to_string(),
            })?;
        let keyword = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str());
        (AggType::from_keyword(keyword)?, path)
    } else {
        (AggType::default(), head)
    };

    if !NAME_PATH.is_match(path) {
        return Err(SyntaxError::InvalidName {
            token: token.to_string(),
            name: path.to_string(),
        });
    }

    let (name_prefix, name) = match path.rsplit_once('.') {
        Some((prefix, name)) => (prefix.to_string(), name.to_string()),
        None => (String::new(), path.to_string()),
    };

    let nested = nested.map(parse_expression).transpose()?;

    Ok(SubAgg {
        agg_type,
        name_prefix,
        name,
        nested,
    })
}

/// Returns the text between the `[` at byte `open` and its matching `]`,
/// which must be the last character of the token.
fn bracket_body(token: &str, open: usize) -> Result<&str, SyntaxError> {
    let mut depth = 0usize;

    for (idx, ch) in token[open..].char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + idx;
                    if close != token.len() - 1 {
                        return Err(SyntaxError::Malformed {
                            token: token.to_string(),
                            reason: "unexpected text after ']'".to_string(),
                        });
                    }
                    return Ok(&token[open + 1..close]);
                }
            }
            _ => {}
        }
    }

    Err(SyntaxError::UnbalancedBracket {
        position: token[..open].chars().count(),
    })
}
