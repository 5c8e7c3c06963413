use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    ast::{AggType, Expression, Shape, SubAgg},
    error::{AggError, AggResult},
    inflect::{pluralize, singularize},
    merge::deep_merge,
    node::AggNode,
    parser::parse_expression,
};

const DEFAULT_COUNT_FIELD: &str = "count";

/// Options accepted alongside an accessor call or an expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessOptions {
    /// Nested expression evaluated against the resolved child (count types)
    /// or against every bucket (bucket types).
    pub with: Option<String>,
    /// Name of the per-bucket count field, `count` when unset.
    pub doc_count: Option<String>,
    /// Emit multi-value results as a `[{key, value}]` list.
    pub as_array: bool,
}

impl AccessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.with = Some(expression.into());
        self
    }

    pub fn with_count_field(mut self, field: impl Into<String>) -> Self {
        self.doc_count = Some(field.into());
        self
    }

    pub fn as_array(mut self) -> Self {
        self.as_array = true;
        self
    }
}

/// Flattens one raw aggregation tree.
///
/// Every public accessor reports a missing field as [`AggError::Parse`],
/// naming the field (or expression) it was asked for and carrying the whole
/// tree this flattener was built from. Malformed expressions are reported as
/// [`AggError::Syntax`] before anything is evaluated.
///
/// # Examples
///
/// ```
/// use agglens::Flattener;
/// use serde_json::json;
///
/// let aggs = json!({
///     "name": {
///         "buckets": [
///             {"key": "Alice", "doc_count": 300, "transaction_count": {"value": 120}},
///             {"key": "Bob", "doc_count": 200, "transaction_count": {"value": 230}}
///         ]
///     }
/// });
///
/// let flat = Flattener::new(&aggs)
///     .from_expression("terms:name[transaction_count]")
///     .unwrap();
///
/// assert_eq!(flat, json!({"names": [
///     {"name": "Alice", "count": 300, "transaction_count": 120},
///     {"name": "Bob", "count": 200, "transaction_count": 230}
/// ]}));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Flattener<'a> {
    root: AggNode<'a>,
}

impl<'a> Flattener<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Flattener {
            root: AggNode::new(raw),
        }
    }

    pub fn raw(&self) -> &'a Value {
        self.root.raw()
    }

    /// `{ name: { count: doc_count } }`, with `options.with` merged under `name`.
    pub fn count(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Count, name, options)
    }

    pub fn filter(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Filter, name, options)
    }

    pub fn nested(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Nested, name, options)
    }

    /// `{ name: value }` for a single-value metric.
    pub fn value(&self, name: &str) -> AggResult<Value> {
        self.access(AggType::Value, name, &AccessOptions::default())
    }

    pub fn avg(&self, name: &str) -> AggResult<Value> {
        self.access(AggType::Avg, name, &AccessOptions::default())
    }

    pub fn sum(&self, name: &str) -> AggResult<Value> {
        self.access(AggType::Sum, name, &AccessOptions::default())
    }

    pub fn max(&self, name: &str) -> AggResult<Value> {
        self.access(AggType::Max, name, &AccessOptions::default())
    }

    pub fn min(&self, name: &str) -> AggResult<Value> {
        self.access(AggType::Min, name, &AccessOptions::default())
    }

    /// One `{ singular(name): key, count: doc_count }` record per bucket.
    pub fn terms(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Terms, name, options)
    }

    pub fn histogram(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Histogram, name, options)
    }

    pub fn ranges(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Ranges, name, options)
    }

    pub fn geohash_grid(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::GeohashGrid, name, options)
    }

    pub fn multi_count(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::MultiCount, name, options)
    }

    /// `{ name: values }`, or `{ name: [{key, value}] }` with `as_array`.
    pub fn percentiles(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::Percentiles, name, options)
    }

    pub fn multi_value(&self, name: &str, options: &AccessOptions) -> AggResult<Value> {
        self.access(AggType::MultiValue, name, options)
    }

    /// Runs the strategy for `agg_type` on the dotted path `name`.
    ///
    /// The output key is the last segment of `name`.
    pub fn access(&self, agg_type: AggType, name: &str, options: &AccessOptions) -> AggResult<Value> {
        let with = options.with.as_deref().map(parse_expression).transpose()?;
        let strategy = Strategy::from_options(options);

        self.guarded(name, || match agg_type.shape() {
            Shape::Count => strategy.count(self.root, name, with.as_ref()),
            Shape::Value => strategy.value(self.root, name),
            Shape::Buckets => strategy.buckets(self.root, name, with.as_ref()),
            Shape::MultiValue => strategy.multi_value(self.root, name),
        })
    }

    /// Evaluates a whole expression and merges every sub-expression's
    /// result into one object.
    pub fn from_expression(&self, expression: &str) -> AggResult<Value> {
        self.from_expression_with(expression, &AccessOptions::default())
    }

    /// Like [`Flattener::from_expression`]; `doc_count` and `as_array` apply
    /// to every sub-expression, `with` is ignored.
    pub fn from_expression_with(&self, expression: &str, options: &AccessOptions) -> AggResult<Value> {
        let parsed = parse_expression(expression)?;
        self.evaluate(&parsed, options)
    }

    /// Evaluates an already parsed expression.
    pub fn evaluate(&self, expression: &Expression, options: &AccessOptions) -> AggResult<Value> {
        debug!(expression = expression.source(), "flattening aggregations");
        let strategy = Strategy::from_options(options);
        self.guarded(expression.source(), || strategy.expression(self.root, expression))
    }

    /// Rewraps lookup failures raised by `op` as a single diagnostic naming
    /// `at` and carrying the top-level tree.
    fn guarded(&self, at: &str, op: impl FnOnce() -> AggResult<Value>) -> AggResult<Value> {
        op().map_err(|e| {
            if !matches!(e, AggError::Lookup(_) | AggError::Parse { .. }) {
                return e;
            }
            debug!(at, error = %e, "aggregation lookup failed");
            AggError::Parse {
                at: at.to_string(),
                body: self.root.raw().clone(),
            }
        })
    }
}

/// Evaluates one parsed sub-expression against `node` with default options.
///
/// Lookup failures are returned as [`AggError::Lookup`] naming the path
/// relative to the node that was searched.
pub fn evaluate(node: AggNode<'_>, sub_agg: &SubAgg) -> AggResult<Value> {
    Strategy::default().sub_agg(node, sub_agg)
}

/// Output-shape settings shared by a whole evaluation.
#[derive(Debug, Clone, Copy)]
struct Strategy<'o> {
    count_field: &'o str,
    as_array: bool,
}

impl Default for Strategy<'_> {
    fn default() -> Self {
        Strategy {
            count_field: DEFAULT_COUNT_FIELD,
            as_array: false,
        }
    }
}

impl<'o> Strategy<'o> {
    fn from_options(options: &'o AccessOptions) -> Self {
        Strategy {
            count_field: options.doc_count.as_deref().unwrap_or(DEFAULT_COUNT_FIELD),
            as_array: options.as_array,
        }
    }

    fn expression(&self, node: AggNode<'_>, expression: &Expression) -> AggResult<Value> {
        let mut merged = Value::Object(Map::new());
        for sub_agg in expression.sub_aggs() {
            deep_merge(&mut merged, self.sub_agg(node, sub_agg)?);
        }
        Ok(merged)
    }

    fn sub_agg(&self, node: AggNode<'_>, sub_agg: &SubAgg) -> AggResult<Value> {
        trace!(
            agg_type = %sub_agg.agg_type,
            path = %sub_agg.path(),
            nested = sub_agg.nested.is_some(),
            "evaluating sub-aggregation"
        );

        let scope = if sub_agg.name_prefix.is_empty() {
            node
        } else {
            node.get(&sub_agg.name_prefix).unwrap_or_else(|_| {
                debug!(prefix = %sub_agg.name_prefix, "scope prefix not found, using current node");
                node
            })
        };

        let name = sub_agg.name.as_str();
        match (sub_agg.agg_type.shape(), &sub_agg.nested) {
            (Shape::Count, nested) => self.count(scope, name, nested.as_ref()),
            (Shape::Buckets, nested) | (_, nested @ Some(_)) => {
                let records = self.buckets(scope, name, nested.as_ref())?;
                Ok(keyed(pluralize(name), records))
            }
            (Shape::Value, None) => self.value(scope, name),
            (Shape::MultiValue, None) => self.multi_value(scope, name),
        }
    }

    fn count(&self, node: AggNode<'_>, name: &str, with: Option<&Expression>) -> AggResult<Value> {
        let child = node.get(name)?;
        let mut inner = keyed(DEFAULT_COUNT_FIELD.to_string(), child.doc_count()?.clone());

        if let Some(expression) = with {
            deep_merge(&mut inner, self.expression(child, expression)?);
        }
        Ok(keyed(output_key(name), inner))
    }

    fn value(&self, node: AggNode<'_>, name: &str) -> AggResult<Value> {
        let value = node.get(name)?.value()?;
        Ok(keyed(output_key(name), value.clone()))
    }

    fn buckets(&self, node: AggNode<'_>, name: &str, with: Option<&Expression>) -> AggResult<Value> {
        let key_field = singularize(&output_key(name));
        let mut records = Vec::new();

        for bucket in node.get(name)?.buckets()? {
            let mut record = Map::new();
            record.insert(key_field.clone(), bucket.display_key());
            record.insert(self.count_field.to_string(), bucket.node.doc_count()?.clone());

            let mut record = Value::Object(record);
            if let Some(expression) = with {
                deep_merge(&mut record, self.expression(bucket.node, expression)?);
            }
            records.push(record);
        }
        Ok(Value::Array(records))
    }

    fn multi_value(&self, node: AggNode<'_>, name: &str) -> AggResult<Value> {
        let values = node.get(name)?.values()?;

        let shaped = match values {
            Value::Object(map) if self.as_array => Value::Array(
                map.iter()
                    .map(|(key, value)| {
                        let mut pair = Map::new();
                        pair.insert("key".to_string(), Value::String(key.clone()));
                        pair.insert("value".to_string(), value.clone());
                        Value::Object(pair)
                    })
                    .collect(),
            ),
            other => other.clone(),
        };
        Ok(keyed(output_key(name), shaped))
    }
}

fn output_key(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_string()
}

fn keyed(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}
