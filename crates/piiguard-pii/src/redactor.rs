//! PII redaction

mod masks;
mod standard_redactor;

pub use masks::{mask_handle, mask_keep_edges, mask_word};
pub use standard_redactor::StandardRedactor;

use piiguard_core::FieldMap;

/// Filler character for masked positions
pub const MASK_CHAR: char = 'X';

/// Replacement for fields that are redacted wholesale
pub const REDACTION_MARKER: &str = "[REDACTED_PII]";

/// Trait for masking the sensitive fields of a classified record
pub trait RecordRedactor: Send + Sync {
    /// Mask `fields` when `is_pii` is set; otherwise hand them back untouched.
    ///
    /// The key set never changes. Only values are replaced.
    fn redact(&self, fields: FieldMap, is_pii: bool) -> FieldMap;
}
