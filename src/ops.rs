//! Config operations: key lookup, listing, and result types.
//!
//! Provides the logic behind `config list` and `config get`, and the
//! `ConfigResult` enum that callers use to display results.

use std::fmt;

use serde_json::Value;

use crate::error::GlobfigError;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigResult {
    /// A key's merged value.
    KeyValue { key: String, value: String },
    /// All merged configuration key-value pairs.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get a merged value by dotted key.
pub fn get_value(config: &Value, key: &str) -> Result<ConfigResult, GlobfigError> {
    let value = value_get(config, key).ok_or_else(|| GlobfigError::KeyNotFound(key.into()))?;
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: format_value(value),
    })
}

/// List every merged leaf as a dotted key-value pair.
pub fn list_values(config: &Value) -> ConfigResult {
    let entries = crate::flatten::flatten(config)
        .into_iter()
        .map(|(key, value)| (key, format_value(&value)))
        .collect();
    ConfigResult::Listing { entries }
}

/// Navigate a value by dotted key path (e.g. `"database.url"`).
pub fn value_get<'a>(value: &'a Value, dotted_key: &str) -> Option<&'a Value> {
    dotted_key
        .split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Format a value for display. Strings are shown bare.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<not set>".to_string(),
        other => other.to_string(),
    }
}
