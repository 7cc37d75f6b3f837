//! PiiGuard batch runner
//!
//! Reads a delimited file of records, classifies and redacts each record's blob, and writes the
//! three-column result table.

pub mod config;
pub mod pipeline;

pub use config::{AppConfig, LoggingConfig};
pub use pipeline::{BlobColumns, RecordProcessor, RunSummary, process_file, process_stream};
