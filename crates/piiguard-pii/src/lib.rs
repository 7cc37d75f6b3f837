//! PiiGuard PII Classification and Redaction
//!
//! This crate provides the per-record decision procedure and masking transforms:
//! - Shape validators for phone numbers, national IDs, passports, payment handles, emails and IPv4
//! - A classifier combining direct identifiers with a quasi-identifier score
//! - Format-preserving masking of sensitive fields

pub mod classifier;
pub mod detector;
pub mod redactor;

pub use classifier::{
    Assessment, ClassifierConfig, DirectIdentifier, HeuristicClassifier, NameSignalMode,
    QuasiSignals, RecordClassifier,
};
pub use detector::IdentifierKind;
pub use redactor::{MASK_CHAR, REDACTION_MARKER, RecordRedactor, StandardRedactor};
