//! Multi-line WoS record parser.
//!
//! Reconstructs structured publication [`Record`]s from the line-oriented,
//! field-coded WoS plain-text export format. Records carry no explicit
//! delimiter other than the `ER` end marker, so the parser is a small state
//! machine threaded through the line loop:
//!
//! ```text
//! FN Clarivate Analytics Web of Science   <- file header, tolerated
//! VR 1.0
//! PT J                                    <- first field opens a record
//! AU Smith, J                             <- list field, one entry per line
//!    Jones, K                             <- indented: NEW list entry
//! TI A rather long title that wraps
//!    onto the next line                   <- accumulating: space-joined
//! CR Davis FD, 1989, MIS QUART, V13
//! wrapped remainder of the citation       <- unindented: extends last entry
//! UT WOS:000001
//! ER                                      <- finalizes the record
//! EF
//! ```
//!
//! # Line classification
//!
//! - **Field line**: trimmed content starts with two uppercase alphanumeric
//!   characters followed by a space. The pair is the tag, the rest is the
//!   value.
//! - **End-of-record**: the raw line starts with `ER`, or trims to exactly
//!   `ER`. Checked before field classification so it always terminates the
//!   current record regardless of spacing.
//! - Anything else is a **continuation** of the most recent field; the
//!   three-space WoS indent distinguishes "new list entry" from "wrapped
//!   remainder of the previous entry".
//!
//! # State
//!
//! The parser state (current record + current field context) is an explicit
//! value, not ambient globals, so every transition is unit-testable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::fields::{self, FieldKind};
use crate::record::Record;

/// The indentation WoS uses for list-field continuation entries.
const LIST_INDENT: &str = "   ";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while parsing one export file.
///
/// Line handling itself is total — a malformed line degrades to a
/// continuation or is dropped, never faults — so the only per-file failure
/// is an unreadable input. Undecodable input cannot occur either: reads
/// fall back from UTF-8 to Latin-1, and every byte sequence is valid
/// Latin-1.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file could not be read at all.
    #[error("failed to read {path}: {source}")]
    Unreadable {
        /// The offending input path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// The result of classifying a single raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank or whitespace-only line.
    Blank,
    /// End-of-record marker (`ER`).
    EndOfRecord,
    /// A line opening field `code` with `value`.
    Field {
        /// Two-letter field tag.
        code: &'a str,
        /// Trimmed remainder of the line.
        value: &'a str,
    },
    /// A continuation of the current field.
    Continuation {
        /// Trimmed line content.
        value: &'a str,
        /// `true` when the raw line carries the three-space list indent.
        indented: bool,
    },
}

/// Classify one raw line.
///
/// The end-marker check runs first: a raw line starting with `ER`, or one
/// that trims to exactly `ER`, terminates the record however it is spaced.
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(fields::END_OF_RECORD) || trimmed == fields::END_OF_RECORD {
        return LineKind::EndOfRecord;
    }

    if is_field_line(trimmed) {
        return LineKind::Field {
            code: &trimmed[..2],
            value: trimmed[3..].trim(),
        };
    }

    LineKind::Continuation {
        value: trimmed,
        indented: line.starts_with(LIST_INDENT),
    }
}

/// Field lines carry `XX value`: two uppercase alphanumerics (at least one
/// of them a letter), one space, then at least one character of value.
fn is_field_line(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    bytes.len() > 3
        && bytes[2] == b' '
        && bytes[..2]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[..2].iter().any(u8::is_ascii_uppercase)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Streaming record parser for one WoS export file.
///
/// Feed raw lines in order with [`Parser::feed_line`], then call
/// [`Parser::finish`] to collect the finalized records. [`Parser::parse_str`]
/// and [`Parser::parse_path`] wrap the full loop.
#[derive(Debug, Default)]
pub struct Parser {
    current: Record,
    current_field: Option<String>,
    finalized: Vec<Record>,
}

impl Parser {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw line, advancing the parse state.
    pub fn feed_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Blank => {}
            LineKind::EndOfRecord => self.finalize_record(),
            LineKind::Field { code, value } => self.open_field(code, value),
            LineKind::Continuation { value, indented } => self.continue_field(value, indented),
        }
    }

    /// Finish the parse, applying end-of-input retention.
    ///
    /// A trailing record missing its `ER` marker is kept only when it has a
    /// genuine accession identity; fragments without one are assumed to be
    /// truncation noise and dropped. (The end-marker path, in contrast,
    /// always keeps a record, synthesizing an identity when needed.)
    #[must_use]
    pub fn finish(mut self) -> Vec<Record> {
        if !self.current.is_empty() {
            if self.current.ut().is_some() {
                self.finalized.push(self.current);
            } else {
                debug!("dropping trailing record fragment without accession identity");
            }
        }
        self.finalized
    }

    /// Parse a full input string into records.
    #[must_use]
    pub fn parse_str(input: &str) -> Vec<Record> {
        let mut parser = Self::new();
        for line in input.lines() {
            parser.feed_line(line);
        }
        parser.finish()
    }

    /// Read and parse one export file.
    ///
    /// Decoding tries UTF-8 first and falls back to Latin-1 (WoS exports in
    /// the wild ship in either).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unreadable`] if the file cannot be read.
    pub fn parse_path(path: &Path) -> Result<Vec<Record>, ParseError> {
        let bytes = fs::read(path).map_err(|source| ParseError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                debug!(path = %path.display(), "input is not UTF-8, decoding as Latin-1");
                decode_latin1(e.as_bytes())
            }
        };

        let records = Self::parse_str(&content);
        debug!(path = %path.display(), records = records.len(), "parsed export file");
        Ok(records)
    }

    // -- transitions --------------------------------------------------------

    /// Field line: set the field context and store the value by field shape.
    fn open_field(&mut self, code: &str, value: &str) {
        self.current_field = Some(code.to_string());
        match fields::kind_of(code) {
            FieldKind::List => self.current.push_list_item(code, value),
            // First occurrence starts (or restarts) the string.
            FieldKind::Accumulating | FieldKind::Scalar => self.current.set_scalar(code, value),
        }
    }

    /// Continuation line: attribute the value to the current field context.
    fn continue_field(&mut self, value: &str, indented: bool) {
        let Some(code) = self.current_field.clone() else {
            // No field context; nothing is recoverable.
            return;
        };
        match fields::kind_of(&code) {
            FieldKind::List => {
                if indented && self.current.has_list(&code) {
                    // Properly indented continuation: a NEW list entry.
                    self.current.push_list_item(&code, value);
                } else if !self.current.extend_last_list_item(&code, value) {
                    warn!(field = %code, "dropping list continuation with no entry to extend");
                }
            }
            FieldKind::Accumulating => {
                // Wrapped remainder of the string value.
                self.current.append_scalar(&code, value);
            }
            FieldKind::Scalar => {
                // Scalar fields never span lines; drop the remainder.
            }
        }
    }

    /// End marker: finalize the current record, synthesizing an identity
    /// when the export omitted `UT`, then reset the state for the next one.
    fn finalize_record(&mut self) {
        if !self.current.is_empty() {
            if self.current.ut().is_none() {
                let synthetic = format!("MISSING_UT_{}", self.finalized.len());
                self.current.set_scalar(fields::ACCESSION, &synthetic);
            }
            self.finalized.push(std::mem::take(&mut self.current));
        }
        self.current_field = None;
    }
}

/// Decode bytes as Latin-1: every byte maps to the same-numbered code point.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
