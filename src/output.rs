//! Rendering flattened results.
//!
//! - **Compact output** via [`to_json()`]
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **NDJSON** via [`to_ndjson()`] - one record per line, ready for loading
//!   into analytics tools
//!
//! Object keys keep the order in which the flattener produced them.
//!
//! # Examples
//!
//! ```
//! use agglens::output::{to_json, to_ndjson};
//! use serde_json::json;
//!
//! let flat = json!({"names": [{"name": "Alice", "count": 300}, {"name": "Bob", "count": 200}]});
//!
//! assert_eq!(to_json(&json!({"rate": 0.85})), r#"{"rate":0.85}"#);
//! assert_eq!(
//!     to_ndjson(&flat),
//!     "{\"name\":\"Alice\",\"count\":300}\n{\"name\":\"Bob\",\"count\":200}\n"
//! );
//! ```

use serde_json::Value;

pub fn to_json(value: &Value) -> String {
    value.to_string()
}

pub fn to_json_pretty(value: &Value) -> String {
    format!("{value:#}")
}

/// Renders the records of a result, one compact JSON document per line.
///
/// A list yields its elements; an object with a single list-valued key (the
/// usual shape of a bucket expression) yields that list's elements; anything
/// else is written as a single line.
pub fn to_ndjson(value: &Value) -> String {
    let records: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) if map.len() == 1 => match map.values().next() {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![value],
        },
        other => vec![other],
    };

    records
        .into_iter()
        .map(|record| format!("{record}\n"))
        .collect()
}
