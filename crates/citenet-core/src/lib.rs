#![forbid(unsafe_code)]
//! Parsing for Web of Science plain-text exports.
//!
//! A savedrecs export is a sequence of tagged-field records separated by
//! `ER` markers. [`Parser`] turns one file into a list of [`Record`]s;
//! [`normalize`] reduces raw `CR` strings to canonical
//! `AUTHOR, YEAR, SOURCE` identities that the graph layer keys on.

pub mod fields;
pub mod normalize;
pub mod parser;
pub mod record;

pub use parser::{ParseError, Parser};
pub use record::Record;
