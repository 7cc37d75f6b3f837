//! Field shape validators

mod field_validators;

pub use field_validators::{
    digits_only, is_email, is_ipv4, is_national_id, is_passport, is_payment_handle, is_phone,
};

use serde::{Deserialize, Serialize};

/// Identifier shapes a raw field value can be tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Contains `@` and `.`
    Email,

    /// Exactly 10 digits once separators are stripped
    Phone,

    /// Exactly 12 digits once separators are stripped
    NationalId,

    /// One letter followed by 7 digits
    Passport,

    /// Exactly one `@`
    PaymentHandle,

    /// Dotted quad with every octet in [0, 255]
    IpAddress,
}

impl IdentifierKind {
    /// Whether `text` plausibly has this identifier's shape
    pub fn matches(self, text: &str) -> bool {
        match self {
            IdentifierKind::Email => is_email(text),
            IdentifierKind::Phone => is_phone(text),
            IdentifierKind::NationalId => is_national_id(text),
            IdentifierKind::Passport => is_passport(text),
            IdentifierKind::PaymentHandle => is_payment_handle(text),
            IdentifierKind::IpAddress => is_ipv4(text),
        }
    }
}
