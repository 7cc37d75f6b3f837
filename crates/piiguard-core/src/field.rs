//! Dynamically-typed record fields
//!
//! Blob values arrive as text, numbers, booleans, nulls or nested JSON. Every shape test works
//! on text, so values go through [`FieldValue::as_text`] first and nothing downstream has to
//! branch on the JSON type.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Field mapping decoded from a record's structured blob (insertion ordered)
pub type FieldMap = Map<String, Value>;

/// A single field value, tagged by its JSON type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// JSON string
    Text(&'a str),

    /// JSON number (integer or float)
    Number(&'a Number),

    /// JSON boolean
    Flag(bool),

    /// JSON null
    Absent,

    /// JSON array or object
    Nested(&'a Value),
}

/// Look up `key` in `fields`. `None` means the key is missing entirely.
pub fn field<'a>(fields: &'a FieldMap, key: &str) -> Option<FieldValue<'a>> {
    fields.get(key).map(FieldValue::from_json)
}

impl<'a> FieldValue<'a> {
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Number(number) => FieldValue::Number(number),
            Value::Bool(flag) => FieldValue::Flag(*flag),
            Value::Null => FieldValue::Absent,
            nested => FieldValue::Nested(nested),
        }
    }

    /// Coerce the value to the text the validators inspect
    pub fn as_text(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Number(number) => Cow::Owned(number.to_string()),
            FieldValue::Flag(true) => Cow::Borrowed("True"),
            FieldValue::Flag(false) => Cow::Borrowed("False"),
            FieldValue::Absent => Cow::Borrowed("None"),
            FieldValue::Nested(value) => {
                let mut text = String::new();
                write_literal(value, &mut text);
                Cow::Owned(text)
            }
        }
    }

    /// Whether the value is present and non-empty (non-zero for numbers)
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Number(number) => {
                if let Some(n) = number.as_u64() {
                    n != 0
                } else if let Some(n) = number.as_i64() {
                    n != 0
                } else {
                    number.as_f64().is_some_and(|n| n != 0.0)
                }
            }
            FieldValue::Flag(flag) => *flag,
            FieldValue::Absent => false,
            FieldValue::Nested(Value::Array(items)) => !items.is_empty(),
            FieldValue::Nested(Value::Object(members)) => !members.is_empty(),
            FieldValue::Nested(_) => true,
        }
    }
}

/// Render nested values as list/dict literals: `['a', 1, None]`, `{'k': True}`
fn write_literal(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => write_quoted(text, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(item, out);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(key, out);
                out.push_str(": ");
                write_literal(item, out);
            }
            out.push('}');
        }
    }
}

/// Single quotes unless the text holds a `'` and no `"`
fn write_quoted(text: &str, out: &mut String) {
    let quote = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || c == '\u{7f}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}
