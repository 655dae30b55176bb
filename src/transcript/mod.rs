//! Transcript rows and their loader.
//!
//! A transcript is a delimited file with one row per speaker turn:
//!
//! ```text
//! ID  Timestamp  Emitter  Resources  Buildups  Text  Annotation  Comment
//! ```
//!
//! The first row is the header. The last two fields are optional.

mod developments;

use std::fs;
use std::io::Read;
use std::path::Path;

pub use developments::{parse_developments, DevelopmentsError};

use crate::config::TranscriptConfig;
use crate::error::{ConversionError, Result};

/// Number of fields in a complete row.
pub const FIELD_COUNT: usize = 8;

/// Fewest fields a row may have; missing trailing fields are padded.
const MIN_FIELD_COUNT: usize = 6;

/// Separator that introduces the unknown-resources tail of the resources field.
const UNKNOWN_RESOURCES: &str = "; unknown=";

/// One transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// 1-based index among data rows
    pub row: usize,
    pub id: String,
    pub timestamp: String,
    pub emitter: String,
    pub resources: String,
    pub developments: String,
    /// Raw text, still carrying segment markers
    pub text: String,
    pub annotation: String,
    pub comment: String,
}

impl TurnRecord {
    /// Build a record from a row's fields, padding the optional tail.
    pub fn from_fields(row: usize, fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELD_COUNT || fields.len() > FIELD_COUNT {
            return Err(ConversionError::MalformedRow {
                row,
                fields: fields.len(),
                content: fields.join("\t"),
            });
        }

        let field = |i: usize| fields.get(i).map(|s| s.to_string()).unwrap_or_default();

        Ok(Self {
            row,
            id: field(0),
            timestamp: field(1),
            emitter: field(2),
            resources: field(3),
            developments: field(4),
            text: field(5),
            annotation: field(6),
            comment: field(7),
        })
    }

    /// Whether this row is a game-engine announcement.
    pub fn is_server(&self, server_emitter: &str) -> bool {
        self.emitter == server_emitter
    }

    /// Resources with the unknown-resources tail removed.
    pub fn known_resources(&self) -> &str {
        match self.resources.find(UNKNOWN_RESOURCES) {
            Some(pos) => &self.resources[..pos],
            None => &self.resources,
        }
    }

    /// Developments rendered as `key=count` pairs.
    pub fn development_counts(&self) -> Result<String> {
        parse_developments(&self.developments).map_err(|source| {
            ConversionError::MalformedDevelopments {
                row: self.row,
                value: self.developments.clone(),
                source,
            }
        })
    }
}

/// Load a transcript file.
pub fn load_path(path: &Path, config: &TranscriptConfig) -> Result<Vec<TurnRecord>> {
    let content = fs::read_to_string(path).map_err(|e| ConversionError::io(path, e))?;
    let records = load_str(&content, config)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Loaded transcript");
    Ok(records)
}

/// Load a transcript from any reader.
pub fn load_reader<R: Read>(mut reader: R, config: &TranscriptConfig) -> Result<Vec<TurnRecord>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    load_str(&content, config)
}

/// Load a transcript from a string.
///
/// Blank lines between rows are malformed rows with no fields. Blank lines
/// after the last row are ignored.
pub fn load_str(content: &str, config: &TranscriptConfig) -> Result<Vec<TurnRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut header = csv::StringRecord::new();
    if !csv_reader.read_record(&mut header)? {
        return Err(ConversionError::MissingHeader);
    }

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    for row_number in 1.. {
        let offset = csv_reader.position().byte() as usize;
        if !csv_reader.read_record(&mut row)? {
            break;
        }
        if blank_line_at(content.as_bytes(), offset) {
            return Err(ConversionError::MalformedRow {
                row: row_number,
                fields: 0,
                content: String::new(),
            });
        }

        if row.iter().eq(header.iter()) {
            tracing::debug!(row = row_number, "Skipping repeated header row");
            continue;
        }

        let fields: Vec<&str> = row.iter().collect();
        records.push(TurnRecord::from_fields(row_number, &fields)?);
    }

    Ok(records)
}

/// Whether the input holds an empty line at `offset`, where the reader
/// stopped after the previous record.
fn blank_line_at(input: &[u8], offset: usize) -> bool {
    let mut rest = input.get(offset..).unwrap_or_default();
    // the `\n` of a CRLF terminator may not have been consumed yet
    if offset > 0 && input.get(offset - 1) == Some(&b'\r') {
        rest = rest.strip_prefix(b"\n").unwrap_or(rest);
    }
    matches!(rest.first(), Some(b'\n' | b'\r'))
}
