//! Delimited-file batch pipeline
//!
//! Each row is handled on its own: decode the blob, classify, redact, serialize. A row that
//! fails any of these steps produces a fallback row instead of stopping the run.

use piiguard_core::json::to_json_line;
use piiguard_core::{OutputRow, Record, Result};
use piiguard_pii::{
    ClassifierConfig, HeuristicClassifier, RecordClassifier, RecordRedactor, StandardRedactor,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::Utf8Error;
use tracing::{debug, info, warn};

/// Column holding the record identifier
pub const RECORD_ID_COLUMN: &str = "record_id";

/// Accepted names of the blob column, in lookup order
pub const BLOB_COLUMNS: [&str; 2] = ["Data_json", "data_json"];

/// Output header
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written to the output, fallbacks included
    pub processed: usize,
    /// Rows classified as PII
    pub pii: usize,
    /// Rows replaced by a fallback row
    pub fallbacks: usize,
    /// Rows without a readable `record_id`
    pub skipped: usize,
}

/// Positions of the interesting columns in the input header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobColumns {
    record_id: Option<usize>,
    blobs: Vec<usize>,
}

impl BlobColumns {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header == name);

        Self {
            record_id: position(RECORD_ID_COLUMN),
            blobs: BLOB_COLUMNS.iter().filter_map(|name| position(name)).collect(),
        }
    }

    pub fn has_blob(&self) -> bool {
        !self.blobs.is_empty()
    }

    /// The `record_id` cell, empty when the column or cell is missing.
    /// `None` when the cell is not valid UTF-8.
    pub fn record_id<'r>(&self, row: &'r csv::ByteRecord) -> Option<&'r str> {
        match self.record_id.and_then(|i| row.get(i)) {
            Some(cell) => std::str::from_utf8(cell).ok(),
            None => Some(""),
        }
    }

    /// First non-empty blob cell, or the empty string
    pub fn blob<'r>(&self, row: &'r csv::ByteRecord) -> std::result::Result<&'r str, Utf8Error> {
        let cell = self
            .blobs
            .iter()
            .filter_map(|&i| row.get(i))
            .find(|cell| !cell.is_empty())
            .unwrap_or(b"");

        std::str::from_utf8(cell)
    }
}

/// Classifies and redacts single records
pub struct RecordProcessor {
    classifier: Box<dyn RecordClassifier>,
    redactor: Box<dyn RecordRedactor>,
}

impl RecordProcessor {
    pub fn new(classifier: Box<dyn RecordClassifier>, redactor: Box<dyn RecordRedactor>) -> Self {
        Self {
            classifier,
            redactor,
        }
    }

    /// Heuristic classifier plus the standard redactor
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            Box::new(HeuristicClassifier::new(*config)),
            Box::new(StandardRedactor::new()),
        )
    }

    pub fn process(&self, record_id: &str, blob: &str) -> Result<OutputRow> {
        let record = Record::from_blob(record_id, blob)?;
        let assessment = self.classifier.assess(&record.fields);
        let is_pii = assessment.is_pii();
        debug!(
            record_id,
            is_pii,
            score = assessment.score,
            direct = ?assessment.direct,
            "Classified record"
        );

        let redacted = self.redactor.redact(record.fields, is_pii);

        Ok(OutputRow {
            record_id: record.record_id,
            redacted_data_json: to_json_line(&redacted)?,
            is_pii,
        })
    }

    /// Like [`RecordProcessor::process`], substituting the fallback row on failure
    pub fn process_or_fallback(&self, record_id: &str, blob: &str) -> (OutputRow, bool) {
        match self.process(record_id, blob) {
            Ok(row) => (row, false),
            Err(e) => {
                warn!(record_id, error = %e, "Record failed, emitting fallback row");
                (OutputRow::fallback(record_id), true)
            }
        }
    }
}

impl Default for RecordProcessor {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

/// Process every row of `input` and write the result table to `output`
pub fn process_stream<R: Read, W: Write>(
    processor: &RecordProcessor,
    input: R,
    output: W,
) -> Result<RunSummary> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let columns = BlobColumns::from_headers(reader.headers()?);
    if !columns.has_blob() {
        warn!(
            expected = ?BLOB_COLUMNS,
            "Input has no blob column, every record will be treated as empty"
        );
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    let mut summary = RunSummary::default();

    for (index, result) in reader.byte_records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping unreadable row");
                summary.skipped += 1;
                continue;
            }
        };

        let Some(record_id) = columns.record_id(&row) else {
            warn!(row = index + 1, "Skipping row with undecodable record_id");
            summary.skipped += 1;
            continue;
        };

        let (output_row, fallback) = match columns.blob(&row) {
            Ok(blob) => processor.process_or_fallback(record_id, blob),
            Err(e) => {
                warn!(record_id, error = %e, "Blob is not valid UTF-8, emitting fallback row");
                (OutputRow::fallback(record_id), true)
            }
        };

        summary.processed += 1;
        summary.fallbacks += usize::from(fallback);
        summary.pii += usize::from(output_row.is_pii);

        writer.serialize(&output_row)?;
    }

    writer.flush()?;
    Ok(summary)
}

/// Process the file at `input_path`, writing the result table to `output_path`
pub fn process_file(
    processor: &RecordProcessor,
    input_path: &Path,
    output_path: &Path,
) -> Result<RunSummary> {
    let input = File::open(input_path)?;
    let output = File::create(output_path)?;
    info!(input = %input_path.display(), output = %output_path.display(), "Processing records");

    let summary = process_stream(processor, BufReader::new(input), BufWriter::new(output))?;

    info!(
        processed = summary.processed,
        pii = summary.pii,
        fallbacks = summary.fallbacks,
        skipped = summary.skipped,
        "Finished processing records"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiguard_pii::Assessment;

    fn headers(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    fn row(fields: &[&[u8]]) -> csv::ByteRecord {
        csv::ByteRecord::from(fields.to_vec())
    }

    #[test]
    fn test_columns_upper_case_blob() {
        let columns = BlobColumns::from_headers(&headers(&["record_id", "Data_json"]));
        let record = row(&[b"7", b"{}"]);

        assert!(columns.has_blob());
        assert_eq!(columns.record_id(&record), Some("7"));
        assert_eq!(columns.blob(&record), Ok("{}"));
    }

    #[test]
    fn test_columns_prefer_first_non_empty_blob() {
        let columns =
            BlobColumns::from_headers(&headers(&["data_json", "record_id", "Data_json"]));

        let record = row(&[b"{\"a\": 1}", b"1", b""]);
        assert_eq!(columns.blob(&record), Ok("{\"a\": 1}"));

        let record = row(&[b"{\"b\": 2}", b"1", b"{\"a\": 1}"]);
        assert_eq!(columns.blob(&record), Ok("{\"a\": 1}"));
    }

    #[test]
    fn test_columns_missing() {
        let columns = BlobColumns::from_headers(&headers(&["id", "payload"]));
        let record = row(&[b"1", b"{}"]);

        assert!(!columns.has_blob());
        assert_eq!(columns.record_id(&record), Some(""));
        assert_eq!(columns.blob(&record), Ok(""));
    }

    #[test]
    fn test_short_row() {
        let columns = BlobColumns::from_headers(&headers(&["record_id", "Data_json"]));
        let record = row(&[b"9"]);

        assert_eq!(columns.record_id(&record), Some("9"));
        assert_eq!(columns.blob(&record), Ok(""));
    }

    #[test]
    fn test_invalid_utf8_cells() {
        let columns = BlobColumns::from_headers(&headers(&["record_id", "Data_json"]));

        let record = row(&[b"5", b"{\"a\": \"\xff\xfe\"}"]);
        assert_eq!(columns.record_id(&record), Some("5"));
        assert!(columns.blob(&record).is_err());

        let record = row(&[b"\xff", b"{}"]);
        assert_eq!(columns.record_id(&record), None);
    }

    struct FixedScore(u32);

    impl RecordClassifier for FixedScore {
        fn assess(&self, _fields: &piiguard_core::FieldMap) -> Assessment {
            Assessment {
                score: self.0,
                ..Assessment::default()
            }
        }
    }

    #[test]
    fn test_verdict_follows_assessment_score() {
        let blob = r#"{"email": "vidit@example.com"}"#;

        let processor = RecordProcessor::new(Box::new(FixedScore(2)), Box::new(StandardRedactor));
        let output = processor.process("1", blob).unwrap();
        assert!(output.is_pii);
        assert_eq!(output.redacted_data_json, r#"{"email": "viXXX@example.com"}"#);

        let processor = RecordProcessor::new(Box::new(FixedScore(1)), Box::new(StandardRedactor));
        let output = processor.process("1", blob).unwrap();
        assert!(!output.is_pii);
        assert_eq!(output.redacted_data_json, blob);
    }

    #[test]
    fn test_process_pii_record() {
        let processor = RecordProcessor::default();
        let output = processor.process("1", r#"{"phone": "9876543210"}"#).unwrap();

        assert!(output.is_pii);
        assert_eq!(output.redacted_data_json, r#"{"phone": "98XXXXXX10"}"#);
    }

    #[test]
    fn test_process_unparseable_blob() {
        let processor = RecordProcessor::default();
        let output = processor.process("2", "{oops").unwrap();

        assert!(!output.is_pii);
        assert_eq!(output.redacted_data_json, "{}");
    }

    #[test]
    fn test_process_or_fallback_on_non_object() {
        let processor = RecordProcessor::default();
        let (output, fallback) = processor.process_or_fallback("3", r#""just text""#);

        assert!(fallback);
        assert_eq!(output, OutputRow::fallback("3"));
    }
}
