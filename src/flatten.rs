//! Flatten a merged value into dotted key-value pairs.

use serde_json::Value;

/// Flatten `value` into `(dotted_key, leaf)` pairs, in key order.
///
/// Objects are recursed into, building dotted key paths:
/// `{"database": {"url": "pg://"}}` → `[("database.url", "pg://")]`.
/// Arrays, scalars, `null` and empty objects are leaves. A non-object root is
/// a single leaf with an empty key; an empty root object yields nothing.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if matches!(value, Value::Object(map) if map.is_empty()) {
        return out;
    }
    flatten_into(String::new(), value, &mut out);
    out
}

fn flatten_into(prefix: String, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &map[key.as_str()], out);
            }
        }
        leaf => out.push((prefix, leaf.clone())),
    }
}
