use serde_json::Value;

/// Deep-merges `source` into `target`.
///
/// Objects merge key by key, two arrays concatenate, and any other pair is
/// resolved in favour of `source`.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(into), Value::Object(from)) => {
            for (key, value) in from {
                match into.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        into.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(into), Value::Array(from)) => into.extend(from),
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_nested_objects() {
        let mut target = json!({"a": {"count": 1}, "b": 2});
        deep_merge(&mut target, json!({"a": {"rate": 0.5}, "c": 3}));
        assert_eq!(target, json!({"a": {"count": 1, "rate": 0.5}, "b": 2, "c": 3}));
    }

    #[test]
    fn later_scalars_win() {
        let mut target = json!({"count": 300});
        deep_merge(&mut target, json!({"count": 120}));
        assert_eq!(target, json!({"count": 120}));
    }

    #[test]
    fn arrays_concatenate() {
        let mut target = json!({"names": [{"name": "a"}]});
        deep_merge(&mut target, json!({"names": [{"name": "b"}]}));
        assert_eq!(target, json!({"names": [{"name": "a"}, {"name": "b"}]}));
    }
}
