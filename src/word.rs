//! Term dictionary entries.
//!
//! # Invariants
//!
//! - **NO_EMPTY_SETS**: no document key ever maps to an empty position set.
//!   Every mutation that could empty a set removes the key instead.
//! - **NAME_KEYED**: the occurrence map keys by owned document-name strings,
//!   never by instance identity.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::location::WordLocation;
use crate::occurrence::{BasicWordInfo, SortedPositionSet};

/// One indexed term and its occurrences across all documents.
#[derive(Debug, Clone)]
pub struct Word {
    id: u32,
    text: String,
    occurrences: HashMap<String, SortedPositionSet>,
}

impl Word {
    /// Create a term entry. `text` is lower-cased on construction and must
    /// be non-empty.
    pub fn new(id: u32, text: &str) -> Result<Self> {
        Word::with_occurrences(id, text, HashMap::new())
    }

    /// Create a term entry with a pre-built occurrence map.
    pub fn with_occurrences(
        id: u32,
        text: &str,
        occurrences: HashMap<String, SortedPositionSet>,
    ) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyArgument("text"));
        }
        Ok(Word {
            id,
            text: text.to_lowercase(),
            occurrences,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Adopt the permanent identifier assigned by an external store.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// The lower-cased term text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The per-document occurrence map.
    pub fn occurrences(&self) -> &HashMap<String, SortedPositionSet> {
        &self.occurrences
    }

    /// Positions of this term in one document, if any.
    pub fn document_positions(&self, document: &str) -> Option<&SortedPositionSet> {
        self.occurrences.get(document)
    }

    /// Record a single occurrence in `document`, creating the document's
    /// position set on first use.
    pub fn add_occurrence(
        &mut self,
        document: &str,
        first_char_index: u16,
        word_index: u16,
        location: WordLocation,
    ) {
        self.occurrences
            .entry(document.to_string())
            .or_default()
            .add(BasicWordInfo::new(first_char_index, word_index, location));
    }

    /// Drop every occurrence recorded for `document`, returning the removed
    /// positions when the document was present.
    pub fn remove_occurrences(&mut self, document: &str) -> Option<SortedPositionSet> {
        self.occurrences.remove(document)
    }

    /// Replace (not merge) the position set of `document` with `positions`.
    ///
    /// An empty `positions` removes the document's entry entirely. This is
    /// the bulk/rebuild path; incremental updates go through
    /// [`Word::add_occurrence`].
    pub fn bulk_add_occurrences(&mut self, document: &str, positions: SortedPositionSet) {
        if positions.is_empty() {
            self.occurrences.remove(document);
        } else {
            self.occurrences.insert(document.to_string(), positions);
        }
    }

    /// Total number of recorded occurrences across all documents.
    pub fn total_occurrences(&self) -> usize {
        self.occurrences.values().map(SortedPositionSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(items: &[(u16, u16)]) -> SortedPositionSet {
        items
            .iter()
            .map(|&(first, ordinal)| {
                BasicWordInfo::new(first, ordinal, WordLocation::Content)
            })
            .collect()
    }

    #[test]
    fn construction_lowercases_text() {
        let word = Word::new(1, "Hello").unwrap();
        assert_eq!(word.text(), "hello");
        assert!(word.occurrences().is_empty());
        assert_eq!(word.total_occurrences(), 0);
    }

    #[test]
    fn construction_rejects_empty_text() {
        assert!(matches!(Word::new(1, ""), Err(Error::EmptyArgument("text"))));
    }

    #[test]
    fn add_occurrences_same_document() {
        let mut word = Word::new(1, "hello").unwrap();
        word.add_occurrence("Doc", 0, 0, WordLocation::Content);
        word.add_occurrence("Doc", 10, 1, WordLocation::Content);

        assert_eq!(word.occurrences().len(), 1);
        assert_eq!(word.total_occurrences(), 2);
        let set = word.document_positions("Doc").unwrap();
        assert_eq!(set.get(0).unwrap().first_char_index(), 0);
        assert_eq!(set.get(1).unwrap().first_char_index(), 10);
    }

    #[test]
    fn add_occurrences_different_documents() {
        let mut word = Word::new(1, "hello").unwrap();
        word.add_occurrence("Doc1", 0, 0, WordLocation::Content);
        word.add_occurrence("Doc2", 10, 1, WordLocation::Content);

        assert_eq!(word.occurrences().len(), 2);
        assert_eq!(word.total_occurrences(), 2);
    }

    #[test]
    fn remove_occurrences_drops_one_document() {
        let mut word = Word::new(1, "hello").unwrap();
        word.add_occurrence("Doc1", 0, 0, WordLocation::Content);
        word.add_occurrence("Doc1", 10, 1, WordLocation::Content);
        word.add_occurrence("Doc2", 5, 0, WordLocation::Content);

        let removed = word.remove_occurrences("Doc1").unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(word.occurrences().len(), 1);
        assert_eq!(word.total_occurrences(), 1);
        assert!(word.document_positions("Doc2").is_some());
    }

    #[test]
    fn bulk_add_replaces_existing_positions() {
        let mut word = Word::new(1, "hello").unwrap();
        word.add_occurrence("Doc0", 10, 0, WordLocation::Content);
        word.add_occurrence("Doc", 0, 0, WordLocation::Content);

        word.bulk_add_occurrences("Doc", positions(&[(10, 0), (25, 1), (102, 2)]));

        assert_eq!(word.occurrences().len(), 2);
        assert_eq!(word.total_occurrences(), 4);
        let set = word.document_positions("Doc").unwrap();
        assert_eq!(set.get(0).unwrap().first_char_index(), 10);
        assert_eq!(set.get(1).unwrap().first_char_index(), 25);
        assert_eq!(set.get(2).unwrap().first_char_index(), 102);
    }

    #[test]
    fn bulk_add_empty_set_removes_document() {
        let mut word = Word::new(1, "hello").unwrap();
        word.add_occurrence("Doc0", 10, 0, WordLocation::Content);
        word.add_occurrence("Doc", 0, 0, WordLocation::Content);

        word.bulk_add_occurrences("Doc", SortedPositionSet::new());

        assert_eq!(word.occurrences().len(), 1);
        assert_eq!(word.total_occurrences(), 1);
        assert!(word.document_positions("Doc").is_none());
    }

    #[test]
    fn adopts_external_id() {
        let mut word = Word::new(1, "hello").unwrap();
        word.set_id(42);
        assert_eq!(word.id(), 42);
    }
}
