//! Length-prefixed record lines: `LLL` + `CCCC` + value.

use std::collections::BTreeMap;

use intake_core::config::{CodecConfig, LINE_OVERHEAD, MAX_LINE_LEN};
use intake_core::models::field::{Field, FieldCode};
use tracing::debug;

use crate::charset::decode_cp437;
use crate::error::CodecError;

/// Upper bound on total-length patch passes. A pass changes the record
/// length only when the declared value changes its own digit count, so the
/// value settles within a few passes; the cap turns a broken invariant
/// into an error instead of a loop.
pub const MAX_LENGTH_PASSES: usize = 8;

/// Fields of a received record, last occurrence of each code winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    fields: BTreeMap<FieldCode, Vec<u8>>,
}

impl DecodedRecord {
    pub fn get(&self, code: FieldCode) -> Option<&[u8]> {
        self.fields.get(&code).map(Vec::as_slice)
    }

    /// The value as text, reading the upper byte half as CP437.
    ///
    /// Printable ASCII maps to itself in CP437, so records in either
    /// charset read back unchanged.
    pub fn text(&self, code: FieldCode) -> Option<String> {
        self.get(code).map(decode_cp437)
    }

    /// Like [`text`](Self::text), with a missing field read as empty.
    pub fn text_or_empty(&self, code: FieldCode) -> String {
        self.text(code).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldCode, &[u8])> {
        self.fields.iter().map(|(code, value)| (*code, value.as_slice()))
    }
}

/// Decode a record leniently.
///
/// Lines are split on LF with CRLF accepted. Blank lines, lines shorter
/// than length + code, and lines whose code is not alphanumeric are
/// dropped. The declared length is not checked.
pub fn decode(bytes: &[u8]) -> DecodedRecord {
    let mut fields = BTreeMap::new();
    let mut dropped = 0usize;

    for line in bytes.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        if line.len() < LINE_OVERHEAD {
            dropped += 1;
            continue;
        }
        let Some(code) = FieldCode::from_bytes(&line[3..LINE_OVERHEAD]) else {
            dropped += 1;
            continue;
        };
        fields.insert(code, line[LINE_OVERHEAD..].to_vec());
    }

    debug!(fields = fields.len(), dropped, "record decoded");
    DecodedRecord { fields }
}

/// Serialize one field as a line, without terminator.
pub fn encode_line(field: &Field, codec: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let len = LINE_OVERHEAD + field.value.len() + codec.counted_terminator_width();
    if len > MAX_LINE_LEN {
        return Err(CodecError::LineTooLong {
            code: field.code,
            len,
        });
    }

    let mut line = Vec::with_capacity(len);
    line.extend_from_slice(format!("{len:03}").as_bytes());
    line.extend_from_slice(field.code.as_bytes());
    line.extend_from_slice(&field.value);
    Ok(line)
}

/// Serialize every field, each line followed by the terminator.
pub fn encode_lines(fields: &[Field], codec: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let terminator = codec.terminator.as_bytes();
    let mut out = Vec::new();
    for field in fields {
        out.extend_from_slice(&encode_line(field, codec)?);
        out.extend_from_slice(terminator);
    }
    Ok(out)
}

/// Encode a record and patch its total length field.
///
/// The total length field must be present; its value is replaced by the
/// byte count of the finished output, zero-padded to
/// `codec.total_length_width`. Output is a pure function of the inputs.
pub fn encode(fields: &[Field], codec: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let holder = fields
        .iter()
        .position(|f| f.code == codec.total_length_code)
        .ok_or(CodecError::MissingTotalLength(codec.total_length_code))?;

    let mut fields = fields.to_vec();
    let mut bytes = encode_lines(&fields, codec)?;

    for pass in 1..=MAX_LENGTH_PASSES {
        let declared = format!("{:0width$}", bytes.len(), width = codec.total_length_width);
        if fields[holder].value == declared.as_bytes() {
            debug!(fields = fields.len(), bytes = bytes.len(), pass, "record encoded");
            return Ok(bytes);
        }
        fields[holder].value = declared.into_bytes();
        bytes = encode_lines(&fields, codec)?;
    }

    Err(CodecError::LengthDidNotConverge {
        passes: MAX_LENGTH_PASSES,
    })
}
