use std::path::Path;

use serde_json::Value;

use crate::error::DecodeError;
use crate::types::Format;

impl Format {
    /// The concrete format for `path`. Only [`Format::Auto`] looks at the extension.
    pub fn for_path(self, path: &Path) -> Format {
        match self {
            Format::Auto => match path.extension().and_then(|ext| ext.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
                _ => Format::Json,
            },
            other => other,
        }
    }

    /// Decode raw file contents into a structured value.
    pub fn decode(self, path: &Path, bytes: &[u8]) -> Result<Value, DecodeError> {
        match self.for_path(path) {
            Format::Toml => {
                let text = std::str::from_utf8(bytes)?;
                let table: toml::Table = toml::from_str(text)?;
                Ok(toml_to_json(toml::Value::Table(table)))
            }
            _ => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

/// Datetimes become their RFC 3339 text. Non-finite floats become `null`.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
