//! Input records and output rows

use crate::error::{Error, Result};
use crate::field::FieldMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single input record: an opaque identifier plus its decoded field mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub record_id: String,
    pub fields: FieldMap,
}

impl Record {
    /// Build a record from its raw blob text
    pub fn from_blob(record_id: impl Into<String>, blob: &str) -> Result<Self> {
        Ok(Self {
            record_id: record_id.into(),
            fields: decode_fields(blob)?,
        })
    }
}

/// Decode a structured blob into a field mapping.
///
/// Text that is not JSON at all decodes to an empty mapping, including blobs using the
/// non-standard `NaN`/`Infinity` literals. Valid JSON that is not an object
/// is a [`Error::MalformedRecord`].
pub fn decode_fields(blob: &str) -> Result<FieldMap> {
    let value: Value = match serde_json::from_str(blob) {
        Ok(value) => value,
        Err(_) => return Ok(FieldMap::new()),
    };

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::MalformedRecord(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub record_id: String,

    /// Serialized, possibly redacted blob
    pub redacted_data_json: String,

    #[serde(serialize_with = "serialize_verdict")]
    pub is_pii: bool,
}

impl OutputRow {
    /// Row emitted when a record could not be processed
    pub fn fallback(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            redacted_data_json: "{}".to_string(),
            is_pii: false,
        }
    }
}

fn serialize_verdict<S>(is_pii: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *is_pii { "True" } else { "False" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let fields = decode_fields(r#"{"phone": "9876543210", "order_value": 10}"#).unwrap();

        assert_eq!(fields.len(), 2);
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["phone", "order_value"]);
    }

    #[test]
    fn test_unparseable_blob_decodes_to_empty_mapping() {
        assert!(decode_fields("{not json").unwrap().is_empty());
        assert!(decode_fields("").unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_literals_are_not_json() {
        let fields = decode_fields(r#"{"phone": "9876543210", "score": NaN}"#).unwrap();
        assert!(fields.is_empty());

        assert!(decode_fields(r#"{"limit": Infinity}"#).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_blob_is_malformed() {
        let err = decode_fields("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
        assert!(err.to_string().contains("an array"));

        assert!(decode_fields("42").is_err());
    }

    #[test]
    fn test_record_from_blob() {
        let record = Record::from_blob("7", r#"{"name": "Vidit Pokhral"}"#).unwrap();
        assert_eq!(record.record_id, "7");
        assert!(record.fields.contains_key("name"));
    }

    #[test]
    fn test_fallback_row() {
        let row = OutputRow::fallback("12");
        assert_eq!(row.redacted_data_json, "{}");
        assert!(!row.is_pii);
    }

    #[test]
    fn test_verdict_serializes_as_title_case() {
        let row = OutputRow {
            record_id: "1".to_string(),
            redacted_data_json: "{}".to_string(),
            is_pii: true,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["is_pii"], "True");
    }
}
