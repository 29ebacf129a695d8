//! Search results.

use std::sync::Arc;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::occurrence::WordInfo;
use crate::relevance::Relevance;

/// The matched occurrences of one result, kept sorted by position with a
/// text tiebreak.
///
/// Insertion de-duplicates under the same ordering used for sorting, so one
/// `(location, word_index, text)` slot holds at most one entry.
#[derive(Debug, Clone, Default)]
pub struct WordInfoCollection {
    items: Vec<WordInfo>,
}

impl WordInfoCollection {
    pub fn new() -> Self {
        WordInfoCollection::default()
    }

    /// Insert an occurrence, returning whether it was added.
    pub fn add(&mut self, item: WordInfo) -> bool {
        match self.items.binary_search_by(|probe| probe.position_cmp(&item)) {
            Ok(_) => false,
            Err(index) => {
                self.items.insert(index, item);
                true
            }
        }
    }

    /// Whether a value-equal occurrence is present.
    pub fn contains(&self, item: &WordInfo) -> bool {
        self.items
            .binary_search_by(|probe| probe.position_cmp(item))
            .map(|index| self.items[index] == *item)
            .unwrap_or(false)
    }

    /// Whether any occurrence has the given normalized text.
    pub fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text() == text)
    }

    /// Whether an occurrence of `text` starts at `first_char_index`.
    pub fn contains_occurrence(&self, text: &str, first_char_index: u16) -> bool {
        self.items
            .iter()
            .any(|item| item.text() == text && item.first_char_index() == first_char_index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordInfo> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordInfo> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a WordInfoCollection {
    type Item = &'a WordInfo;
    type IntoIter = std::slice::Iter<'a, WordInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// One matched document with its occurrences and relevance.
#[derive(Clone)]
pub struct SearchResult {
    document: Arc<dyn Document>,
    matches: WordInfoCollection,
    relevance: Relevance,
}

impl std::fmt::Debug for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResult")
            .field("document", &self.document.name())
            .field("matches", &self.matches)
            .field("relevance", &self.relevance)
            .finish()
    }
}

impl SearchResult {
    pub fn new(document: Arc<dyn Document>) -> Self {
        SearchResult {
            document,
            matches: WordInfoCollection::new(),
            relevance: Relevance::default(),
        }
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn matches(&self) -> &WordInfoCollection {
        &self.matches
    }

    pub fn matches_mut(&mut self) -> &mut WordInfoCollection {
        &mut self.matches
    }

    pub fn relevance(&self) -> &Relevance {
        &self.relevance
    }

    pub fn relevance_mut(&mut self) -> &mut Relevance {
        &mut self.relevance
    }
}

/// All results of one query, at most one per document name.
#[derive(Debug, Clone, Default)]
pub struct SearchResultCollection {
    items: Vec<SearchResult>,
}

impl SearchResultCollection {
    pub fn new() -> Self {
        SearchResultCollection::default()
    }

    /// Append a result. Fails if the document already has one.
    pub fn add(&mut self, result: SearchResult) -> Result<()> {
        if self.get_search_result(result.document().name()).is_some() {
            return Err(Error::DuplicateDocument(
                result.document().name().to_string(),
            ));
        }
        self.items.push(result);
        Ok(())
    }

    /// Append without the duplicate check. Callers must guarantee the
    /// document is not already present.
    pub(crate) fn push_unchecked(&mut self, result: SearchResult) {
        self.items.push(result);
    }

    /// The result for the document with the given name, if any.
    pub fn get_search_result(&self, document_name: &str) -> Option<&SearchResult> {
        self.items
            .iter()
            .find(|result| result.document().name() == document_name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a SearchResultCollection {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::WordLocation;
    use crate::tokenizer;
    use chrono::{DateTime, Utc};

    struct FakeDocument {
        name: String,
    }

    impl Document for FakeDocument {
        fn name(&self) -> &str {
            &self.name
        }
        fn title(&self) -> &str {
            "Title"
        }
        fn type_tag(&self) -> &str {
            "fake"
        }
        fn date_time(&self) -> DateTime<Utc> {
            Utc::now()
        }
        fn tokenize(&self, text: &str) -> Vec<WordInfo> {
            tokenizer::tokenize(text, WordLocation::Content)
        }
    }

    fn doc(name: &str) -> Arc<dyn Document> {
        Arc::new(FakeDocument {
            name: name.to_string(),
        })
    }

    fn info(text: &str, first: u16, ordinal: u16) -> WordInfo {
        WordInfo::new(text, first, ordinal, WordLocation::Content).unwrap()
    }

    #[test]
    fn collection_sorts_and_deduplicates() {
        let mut matches = WordInfoCollection::new();
        assert!(matches.add(info("world", 6, 1)));
        assert!(matches.add(info("hello", 0, 0)));
        assert!(!matches.add(info("hello", 0, 0)));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches.get(0).unwrap().text(), "hello");
        assert_eq!(matches.get(1).unwrap().text(), "world");
    }

    #[test]
    fn collection_lookups() {
        let mut matches = WordInfoCollection::new();
        matches.add(info("hello", 0, 0));
        matches.add(info("hello", 12, 2));

        assert!(matches.contains(&info("hello", 0, 0)));
        assert!(!matches.contains(&info("other", 0, 0)));
        assert!(matches.contains_text("hello"));
        assert!(!matches.contains_text("other"));
        assert!(matches.contains_occurrence("hello", 12));
        assert!(!matches.contains_occurrence("hello", 5));
    }

    #[test]
    fn results_reject_duplicate_documents() {
        let mut results = SearchResultCollection::new();
        results.add(SearchResult::new(doc("doc1"))).unwrap();
        assert!(matches!(
            results.add(SearchResult::new(doc("doc1"))),
            Err(Error::DuplicateDocument(name)) if name == "doc1"
        ));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn results_lookup_by_name() {
        let mut results = SearchResultCollection::new();
        results.add(SearchResult::new(doc("doc1"))).unwrap();
        results.add(SearchResult::new(doc("doc2"))).unwrap();

        assert!(results.get_search_result("doc2").is_some());
        assert!(results.get_search_result("doc3").is_none());
    }
}
