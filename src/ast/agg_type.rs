use crate::error::SyntaxError;

/// How a sub-expression lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{ name: { count: doc_count } }`
    Count,
    /// `{ name: value }`
    Value,
    /// One flat record per bucket.
    Buckets,
    /// `{ name: values }` as a map or a key/value list.
    MultiValue,
}

/// Aggregation type keyword written before `:` in a sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggType {
    Count,
    Filter,
    Nested,
    #[default]
    Value,
    Avg,
    Sum,
    Max,
    Min,
    Terms,
    Histogram,
    Ranges,
    GeohashGrid,
    MultiCount,
    Percentiles,
    MultiValue,
}

impl AggType {
    /// Every keyword, in documentation order.
    pub const ALL: [AggType; 15] = [
        AggType::Count,
        AggType::Filter,
        AggType::Nested,
        AggType::Value,
        AggType::Avg,
        AggType::Sum,
        AggType::Max,
        AggType::Min,
        AggType::Terms,
        AggType::Histogram,
        AggType::Ranges,
        AggType::GeohashGrid,
        AggType::MultiCount,
        AggType::Percentiles,
        AggType::MultiValue,
    ];

    /// Resolves a keyword. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Result<Self, SyntaxError> {
        Self::ALL
            .into_iter()
            .find(|t| t.keyword() == keyword)
            .ok_or_else(|| SyntaxError::UnknownType {
                keyword: keyword.to_string(),
            })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            AggType::Count => "count",
            AggType::Filter => "filter",
            AggType::Nested => "nested",
            AggType::Value => "value",
            AggType::Avg => "avg",
            AggType::Sum => "sum",
            AggType::Max => "max",
            AggType::Min => "min",
            AggType::Terms => "terms",
            AggType::Histogram => "histogram",
            AggType::Ranges => "ranges",
            AggType::GeohashGrid => "geohashGrid",
            AggType::MultiCount => "multiCount",
            AggType::Percentiles => "percentiles",
            AggType::MultiValue => "multiValue",
        }
    }

    pub fn shape(self) -> Shape {
        use AggType::*;
        match self {
            Count | Filter | Nested => Shape::Count,
            Value | Avg | Sum | Max | Min => Shape::Value,
            Terms | Histogram | Ranges | GeohashGrid | MultiCount => Shape::Buckets,
            Percentiles | MultiValue => Shape::MultiValue,
        }
    }
}

impl std::fmt::Display for AggType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
