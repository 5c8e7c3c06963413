use crate::ast::AggType;

/// One parsed sub-expression: `[type:]prefix.name[[nested]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubAgg {
    /// Strategy selected by the type keyword (`value` when omitted).
    pub agg_type: AggType,

    /// Dotted segments before the last one, joined with `.`; empty when the
    /// path has a single segment.
    ///
    /// # Example
    /// ```text
    /// transactions.count   // name_prefix = "transactions", name = "count"
    /// ```
    pub name_prefix: String,

    /// Last path segment, used as the output key.
    pub name: String,

    /// Bracketed expression evaluated against the resolved child or bucket.
    pub nested: Option<Expression>,
}

impl SubAgg {
    /// The full dotted path, prefix included.
    pub fn path(&self) -> String {
        if self.name_prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name_prefix, self.name)
        }
    }
}

/// A whitespace-separated list of sub-expressions, parsed eagerly so that
/// syntax errors surface before any evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    sub_aggs: Vec<SubAgg>,
}

impl Expression {
    pub fn new(source: impl Into<String>, sub_aggs: Vec<SubAgg>) -> Self {
        Expression {
            source: source.into(),
            sub_aggs,
        }
    }

    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sub_aggs(&self) -> &[SubAgg] {
        &self.sub_aggs
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
