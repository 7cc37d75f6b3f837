//! Single-line JSON rendering for redacted blobs
//!
//! Members are separated by `", "` and keys by `": "`. DEL and every non-ASCII character are
//! written as `\uXXXX` escapes so the output column stays plain printable ASCII.

use crate::error::Result;
use crate::field::FieldMap;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

#[derive(Debug, Default, Clone, Copy)]
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;

        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }

            writer.write_all(&bytes[start..index])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }

        writer.write_all(&bytes[start..])
    }
}

/// Render a field mapping as a single JSON line
pub fn to_json_line(fields: &FieldMap) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    fields.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf)?)
}
