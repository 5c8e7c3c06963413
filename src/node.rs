use serde_json::Value;

use crate::error::LookupError;

/// Read-only view over one node of a raw aggregation result.
///
/// The view borrows the tree; nothing is copied until an output value or an
/// error is built.
#[derive(Debug, Clone, Copy)]
pub struct AggNode<'a> {
    raw: &'a Value,
}

/// One entry of a `buckets` list or keyed `buckets` object.
#[derive(Debug, Clone)]
pub struct Bucket<'a> {
    /// Position in a bucket list, or the key in a keyed bucket object.
    pub fallback_key: Value,
    pub node: AggNode<'a>,
}

impl<'a> AggNode<'a> {
    pub fn new(raw: &'a Value) -> Self {
        AggNode { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// Walks `path` segment by segment.
    ///
    /// Object children are looked up by name; unsigned integer segments also
    /// index into arrays. A present `null` is returned as-is, but walking
    /// through it fails.
    pub fn get(&self, path: &str) -> Result<AggNode<'a>, LookupError> {
        let mut current = self.raw;

        for segment in path.split('.') {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };

            current = next.ok_or_else(|| LookupError {
                path: path.to_string(),
                node: self.raw.clone(),
            })?;
        }

        Ok(AggNode { raw: current })
    }

    /// The `doc_count` of a filter, nested or bucket node.
    pub fn doc_count(&self) -> Result<&'a Value, LookupError> {
        self.get("doc_count").map(|n| n.raw)
    }

    /// The `value` of a single-value metric node.
    pub fn value(&self) -> Result<&'a Value, LookupError> {
        self.get("value").map(|n| n.raw)
    }

    /// The `values` of a percentiles-style node.
    pub fn values(&self) -> Result<&'a Value, LookupError> {
        self.get("values").map(|n| n.raw)
    }

    /// The buckets of a multi-bucket node, in document order.
    pub fn buckets(&self) -> Result<Vec<Bucket<'a>>, LookupError> {
        match self.get("buckets")?.raw {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(idx, raw)| Bucket {
                    fallback_key: Value::from(idx),
                    node: AggNode::new(raw),
                })
                .collect()),
            Value::Object(keyed) => Ok(keyed
                .iter()
                .map(|(key, raw)| Bucket {
                    fallback_key: Value::String(key.clone()),
                    node: AggNode::new(raw),
                })
                .collect()),
            _ => Err(LookupError {
                path: "buckets".to_string(),
                node: self.raw.clone(),
            }),
        }
    }
}

impl Bucket<'_> {
    /// `key_as_string` if present, else `key`, else the fallback key.
    pub fn display_key(&self) -> Value {
        let field = |name: &str| self.node.raw.get(name).filter(|v| !v.is_null());

        field("key_as_string")
            .or_else(|| field("key"))
            .cloned()
            .unwrap_or_else(|| self.fallback_key.clone())
    }
}
