//! PiiGuard Core Types
//!
//! This crate provides the types shared by the classifier, the redactor and the batch pipeline:
//! - Dynamically-typed field values and the field mapping
//! - Record and output row types
//! - Output JSON rendering
//! - Core error types

pub mod error;
pub mod field;
pub mod json;
pub mod record;

pub use error::{Error, Result};
pub use field::{FieldMap, FieldValue, field};
pub use record::{OutputRow, Record, decode_fields};
