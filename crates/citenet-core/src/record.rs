//! The publication record produced by the parser.

use std::collections::HashMap;

use crate::fields;

/// One publication's complete field set, keyed by two-letter tag.
///
/// Scalar and accumulating fields live in `scalars`; list fields live in
/// `lists`. The parser guarantees a finalized record carries an accession
/// identity (`UT`), synthesizing a `MISSING_UT_<n>` placeholder when the
/// export omits one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    scalars: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
}

impl Record {
    /// Return `true` if no field has been set yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.lists.is_empty()
    }

    /// Look up a scalar (or accumulating) field value.
    #[must_use]
    pub fn scalar(&self, code: &str) -> Option<&str> {
        self.scalars.get(code).map(String::as_str)
    }

    /// Look up a list field. Missing fields read as the empty list.
    #[must_use]
    pub fn list(&self, code: &str) -> &[String] {
        self.lists.get(code).map_or(&[], Vec::as_slice)
    }

    /// Return `true` if a list field has been opened for `code`.
    #[must_use]
    pub fn has_list(&self, code: &str) -> bool {
        self.lists.contains_key(code)
    }

    /// Set (or overwrite) a scalar field.
    pub fn set_scalar(&mut self, code: &str, value: &str) {
        self.scalars.insert(code.to_string(), value.to_string());
    }

    /// Space-join `value` onto an accumulating field, if it exists.
    ///
    /// A continuation with no opening field line carries no recoverable
    /// context, so it is dropped; returns `false` in that case.
    pub fn append_scalar(&mut self, code: &str, value: &str) -> bool {
        match self.scalars.get_mut(code) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(value);
                true
            }
            None => false,
        }
    }

    /// Append a new entry to a list field, creating the list on first use.
    pub fn push_list_item(&mut self, code: &str, value: &str) {
        self.lists
            .entry(code.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// Space-join `value` onto the last entry of a list field.
    ///
    /// This reconstructs a single citation or address that wrapped across
    /// physical lines without its own tag. Returns `false` (drops the
    /// value) when the list has no entry to extend.
    pub fn extend_last_list_item(&mut self, code: &str, value: &str) -> bool {
        match self.lists.get_mut(code).and_then(|l| l.last_mut()) {
            Some(last) => {
                last.push(' ');
                last.push_str(value);
                true
            }
            None => false,
        }
    }

    /// The accession identity (`UT`), if present.
    #[must_use]
    pub fn ut(&self) -> Option<&str> {
        self.scalar(fields::ACCESSION)
    }

    /// The raw cited-reference strings, in input order.
    #[must_use]
    pub fn cited_refs(&self) -> &[String] {
        self.list(fields::CITED_REFS)
    }

    /// The publication year (`PY`), if present.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.scalar(fields::PUB_YEAR)
    }

    /// The title (`TI`), if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.scalar(fields::TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_reads_as_empty() {
        let rec = Record::default();
        assert!(rec.is_empty());
        assert!(rec.ut().is_none());
        assert!(rec.cited_refs().is_empty());
    }

    #[test]
    fn scalar_overwrite_keeps_last_value() {
        let mut rec = Record::default();
        rec.set_scalar(fields::PUB_YEAR, "2019");
        rec.set_scalar(fields::PUB_YEAR, "2020");
        assert_eq!(rec.year(), Some("2020"));
    }

    #[test]
    fn append_scalar_requires_opened_field() {
        let mut rec = Record::default();
        assert!(!rec.append_scalar(fields::TITLE, "orphan continuation"));

        rec.set_scalar(fields::TITLE, "A study of");
        assert!(rec.append_scalar(fields::TITLE, "long titles"));
        assert_eq!(rec.title(), Some("A study of long titles"));
    }

    #[test]
    fn list_entries_preserve_input_order() {
        let mut rec = Record::default();
        rec.push_list_item(fields::AUTHORS, "Smith, J");
        rec.push_list_item(fields::AUTHORS, "Jones, K");
        assert_eq!(rec.list(fields::AUTHORS), ["Smith, J", "Jones, K"]);
    }

    #[test]
    fn extend_last_merges_wrapped_entry() {
        let mut rec = Record::default();
        rec.push_list_item(fields::CITED_REFS, "Davis FD, 1989,");
        assert!(rec.extend_last_list_item(fields::CITED_REFS, "MIS QUART"));
        assert_eq!(rec.cited_refs(), ["Davis FD, 1989, MIS QUART"]);
    }

    #[test]
    fn extend_last_on_missing_list_drops_value() {
        let mut rec = Record::default();
        assert!(!rec.extend_last_list_item(fields::CITED_REFS, "orphan"));
        assert!(rec.cited_refs().is_empty());
    }
}
