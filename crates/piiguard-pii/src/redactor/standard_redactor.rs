//! Standard field-by-field redactor

use crate::detector::{
    digits_only, is_email, is_ipv4, is_national_id, is_passport, is_payment_handle, is_phone,
};
use crate::redactor::masks::{mask_handle, mask_keep_edges, mask_word};
use crate::redactor::{MASK_CHAR, REDACTION_MARKER, RecordRedactor};
use piiguard_core::{FieldMap, FieldValue};
use serde_json::Value;

const DEVICE_VISIBLE_CHARS: usize = 4;

/// Masks each recognized field according to its own shape test, regardless of which fields
/// made the record PII
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRedactor;

impl StandardRedactor {
    pub fn new() -> Self {
        Self
    }

    /// Masked replacement for a single field, or `None` to leave it as-is
    fn mask_field(&self, key: &str, value: FieldValue<'_>) -> Option<String> {
        let text = value.as_text();

        match key {
            "phone" | "contact" if is_phone(&text) => Some(mask_phone(&text)),
            "aadhar" if is_national_id(&text) => Some(mask_national_id(&text)),
            "passport" if is_passport(&text) => Some(mask_keep_edges(&text, 1, 2)),
            "upi_id" if is_payment_handle(&text) => {
                let (local, domain) = text.split_once('@')?;
                Some(format!("{}@{}", mask_handle(local), domain))
            }
            "name" => {
                let name = text.trim();
                if name.is_empty() {
                    None
                } else {
                    Some(name.split_whitespace().map(mask_word).collect::<Vec<_>>().join(" "))
                }
            }
            "first_name" | "last_name" if value.is_present() => Some(mask_word(&text)),
            "email" if is_email(&text) => Some(mask_email(&text)),
            "address" | "city" if value.is_present() => Some(REDACTION_MARKER.to_string()),
            "pin_code" => Some(REDACTION_MARKER.to_string()),
            "ip_address" if is_ipv4(&text) => {
                let (network, _host) = text.rsplit_once('.')?;
                Some(format!("{}.x", network))
            }
            "device_id" if value.is_present() => Some(mask_device_id(&text)),
            _ => None,
        }
    }
}

impl RecordRedactor for StandardRedactor {
    fn redact(&self, mut fields: FieldMap, is_pii: bool) -> FieldMap {
        if !is_pii {
            return fields;
        }

        for (key, value) in fields.iter_mut() {
            if let Some(masked) = self.mask_field(key, FieldValue::from_json(value)) {
                *value = Value::String(masked);
            }
        }

        fields
    }
}

/// First two and last two digits survive
fn mask_phone(text: &str) -> String {
    let digits = digits_only(text);
    let tail = &digits[digits.len() - 2..];
    format!("{}XXXXXX{}", &digits[..2], tail)
}

/// Only the last four digits survive
fn mask_national_id(text: &str) -> String {
    let digits = digits_only(text);
    format!("XXXX XXXX {}", &digits[digits.len() - 4..])
}

/// Addresses with more than one `@` are left as they are
fn mask_email(text: &str) -> String {
    let mut parts = text.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => format!("{}@{}", mask_handle(local), domain),
        _ => text.to_string(),
    }
}

fn mask_device_id(text: &str) -> String {
    let compact: Vec<char> = text.chars().filter(|c| *c != ' ').collect();
    if compact.len() > DEVICE_VISIBLE_CHARS {
        let split = compact.len() - DEVICE_VISIBLE_CHARS;
        let mut masked: String = std::iter::repeat_n(MASK_CHAR, split).collect();
        masked.extend(&compact[split..]);
        masked
    } else {
        std::iter::repeat_n(MASK_CHAR, DEVICE_VISIBLE_CHARS).collect()
    }
}
