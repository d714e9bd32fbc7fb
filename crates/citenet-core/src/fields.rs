//! Web of Science field-code tags and classification tables.
//!
//! A WoS plain-text export is line-oriented: each data line either starts
//! with a two-letter uppercase tag followed by a single space (`CR Davis FD,
//! 1989, MIS QUART`), or continues the field opened by the most recent tag.
//! This module names the tags the parser cares about and classifies every
//! tag into one of three shapes:
//!
//! - **List** fields hold one entry per physical line (cited references,
//!   authors, addresses, keywords). Indented continuation lines open a new
//!   entry; unindented ones extend the previous entry.
//! - **Accumulating** fields are single strings wrapped across lines
//!   (title, abstract). Continuation lines are space-joined onto the value.
//! - Everything else is a plain **scalar**: one value, later tags overwrite.

/// Export format marker at the top of a file (`FN Clarivate Analytics ...`).
pub const FILE_NAME: &str = "FN";
/// Export format version marker (`VR 1.0`).
pub const VERSION: &str = "VR";
/// Publication type.
pub const PUB_TYPE: &str = "PT";
/// Authors, abbreviated (one per line).
pub const AUTHORS: &str = "AU";
/// Authors, full names (one per line).
pub const AUTHORS_FULL: &str = "AF";
/// Title (wraps across lines).
pub const TITLE: &str = "TI";
/// Source (journal / book series).
pub const SOURCE: &str = "SO";
/// Language.
pub const LANGUAGE: &str = "LA";
/// Document type.
pub const DOC_TYPE: &str = "DT";
/// Author keywords (one per line).
pub const KEYWORDS: &str = "DE";
/// Keywords Plus (one per line).
pub const KEYWORDS_PLUS: &str = "ID";
/// Abstract (wraps across lines).
pub const ABSTRACT: &str = "AB";
/// Author addresses (one per line).
pub const ADDRESSES: &str = "C1";
/// Cited references (one per line).
pub const CITED_REFS: &str = "CR";
/// Cited reference count.
pub const CITED_REF_COUNT: &str = "NR";
/// Times cited.
pub const TIMES_CITED: &str = "TC";
/// Publication year.
pub const PUB_YEAR: &str = "PY";
/// Volume.
pub const VOLUME: &str = "VL";
/// Issue.
pub const ISSUE: &str = "IS";
/// Beginning page.
pub const BEGIN_PAGE: &str = "BP";
/// Ending page.
pub const END_PAGE: &str = "EP";
/// Page count.
pub const PAGE_COUNT: &str = "PG";
/// Accession number — the unique record identity.
pub const ACCESSION: &str = "UT";
/// End-of-record marker.
pub const END_OF_RECORD: &str = "ER";
/// End-of-file marker.
pub const END_OF_FILE: &str = "EF";

/// Tags whose entries arrive one per physical line.
pub const LIST_FIELDS: [&str; 6] = [
    CITED_REFS,
    AUTHORS,
    AUTHORS_FULL,
    ADDRESSES,
    KEYWORDS,
    KEYWORDS_PLUS,
];

/// Tags whose single value wraps across continuation lines.
pub const ACCUMULATING_FIELDS: [&str; 2] = [ABSTRACT, TITLE];

/// How a field stores its value(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One entry per physical line; stored as an ordered list.
    List,
    /// One string value, wrapped across lines; continuations are appended.
    Accumulating,
    /// One string value; later occurrences overwrite.
    Scalar,
}

/// Classify a two-letter tag.
#[must_use]
pub fn kind_of(code: &str) -> FieldKind {
    if LIST_FIELDS.contains(&code) {
        FieldKind::List
    } else if ACCUMULATING_FIELDS.contains(&code) {
        FieldKind::Accumulating
    } else {
        FieldKind::Scalar
    }
}
