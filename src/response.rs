use serde_json::Value;

use crate::{
    error::{AggError, AggResult},
    evaluator::{AccessOptions, Flattener},
};

/// A search response as returned by the backend.
///
/// Wraps the decoded document and hands out its hits and a [`Flattener`]
/// over its `aggregations` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    raw: Value,
}

impl SearchResponse {
    pub fn new(raw: Value) -> Self {
        SearchResponse { raw }
    }

    /// Decodes a response body.
    pub fn from_json(body: &str) -> AggResult<Self> {
        Ok(SearchResponse::new(serde_json::from_str(body)?))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// The documents under `hits.hits`.
    pub fn hits(&self) -> AggResult<&[Value]> {
        self.raw
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| AggError::Response {
                section: "hits.hits".to_string(),
            })
    }

    /// `hits.total`, either a plain number or a `{ "value": n }` object.
    pub fn total_hits(&self) -> Option<u64> {
        let total = self.raw.pointer("/hits/total")?;
        total
            .as_u64()
            .or_else(|| total.get("value").and_then(Value::as_u64))
    }

    pub fn aggregations(&self) -> AggResult<Flattener<'_>> {
        match self.raw.get("aggregations") {
            Some(aggs) if aggs.is_object() => Ok(Flattener::new(aggs)),
            _ => Err(AggError::Response {
                section: "aggregations".to_string(),
            }),
        }
    }

    /// Flattens the `aggregations` section with `expression`.
    pub fn flatten(&self, expression: &str) -> AggResult<Value> {
        self.aggregations()?.from_expression(expression)
    }

    pub fn flatten_with(&self, expression: &str, options: &AccessOptions) -> AggResult<Value> {
        self.aggregations()?.from_expression_with(expression, options)
    }
}

impl From<Value> for SearchResponse {
    fn from(raw: Value) -> Self {
        SearchResponse::new(raw)
    }
}
