//! The in-memory positional index.
//!
//! # Invariants
//!
//! 1. **NAME_KEYED**: documents are identified by name. Storing a new
//!    instance under an existing name replaces the old one.
//! 2. **NO_ORPHAN_WORDS**: a term whose last occurrence is removed leaves
//!    the dictionary in the same mutation.
//! 3. **NOTIFY_IN_MUTATION**: the change callback runs synchronously inside
//!    the mutating call, after the in-memory structures are updated and
//!    before the call returns. This is the at-least-once delivery point.
//! 4. **TRANSIENT_IDS**: without a callback (or when the callback declines
//!    to assign ids) documents and words carry auto-incremented ids
//!    starting at 1. Ids returned by the callback replace them in place.

use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::document::Document;
use crate::dump::{
    ChangeCallback, DumpedChange, DumpedDocument, DumpedWord, DumpedWordMapping, IndexChange,
    IndexEvent, IndexStorerResult, Rehydrator,
};
use crate::error::{Error, Result};
use crate::location::WordLocation;
use crate::occurrence::WordInfo;
use crate::query::SearchParameters;
use crate::results::SearchResultCollection;
use crate::search;
use crate::tokenizer;
use crate::word::Word;

pub(crate) struct IndexedDocument {
    pub(crate) id: u32,
    pub(crate) document: Arc<dyn Document>,
}

/// A positional inverted index held entirely in memory.
///
/// The index owns no persistence. A host that wants durability registers a
/// change callback (see [`InMemoryIndex::set_change_callback`]) and replays
/// its store through [`InMemoryIndex::initialize_data`] at startup.
pub struct InMemoryIndex {
    stop_words: Vec<String>,
    words: HashMap<String, Word>,
    documents: HashMap<String, IndexedDocument>,
    change_callback: Option<ChangeCallback>,
    rehydrator: Option<Rehydrator>,
    next_document_id: u32,
    next_word_id: u32,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        InMemoryIndex {
            stop_words: Vec::new(),
            words: HashMap::new(),
            documents: HashMap::new(),
            change_callback: None,
            rehydrator: None,
            next_document_id: 1,
            next_word_id: 1,
        }
    }

    /// Words excluded from indexing and from queries. Already-indexed
    /// occurrences are unaffected.
    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }

    pub fn set_stop_words(&mut self, stop_words: Vec<String>) {
        self.stop_words = stop_words;
    }

    /// Register the synchronous change notification hook.
    pub fn set_change_callback(&mut self, callback: ChangeCallback) {
        self.change_callback = Some(callback);
    }

    /// Register the document rehydrator used by
    /// [`InMemoryIndex::initialize_data`].
    pub fn set_rehydrator(&mut self, rehydrator: Rehydrator) {
        self.rehydrator = Some(rehydrator);
    }

    /// Number of distinct terms in the dictionary.
    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    /// Number of registered documents.
    pub fn total_documents(&self) -> usize {
        self.documents.len()
    }

    /// Number of stored occurrences across all terms and documents.
    pub fn total_occurrences(&self) -> usize {
        self.words.values().map(Word::total_occurrences).sum()
    }

    pub(crate) fn word(&self, text: &str) -> Option<&Word> {
        self.words.get(text)
    }

    pub(crate) fn document_entry(&self, name: &str) -> Option<&IndexedDocument> {
        self.documents.get(name)
    }

    /// Index a document: its title, optional keywords, and content.
    ///
    /// A document already stored under the same name is removed first (with
    /// its own `DocumentRemoved` notification), so the store acts as a
    /// replace. Returns the number of occurrences indexed after stop-word
    /// removal.
    pub fn store_document(
        &mut self,
        document: Arc<dyn Document>,
        keywords: &[String],
        content: &str,
        state: Option<&dyn Any>,
    ) -> usize {
        let name = document.name().to_string();
        if self.documents.contains_key(&name) {
            self.remove_document(&*document, state);
        }

        let document_id = self.next_document_id;
        self.next_document_id += 1;

        let title_words =
            tokenizer::remove_stop_words(&document.tokenize(document.title()), &self.stop_words);
        let content_words =
            tokenizer::remove_stop_words(&document.tokenize(content), &self.stop_words);

        // Each keyword is a single unit: ordinal i, char offset 0. Keywords
        // that normalize to nothing are dropped.
        let keyword_words: Vec<WordInfo> = keywords
            .iter()
            .enumerate()
            .filter_map(|(i, keyword)| {
                WordInfo::new(
                    keyword,
                    0,
                    u16::try_from(i).unwrap_or(u16::MAX),
                    WordLocation::Keywords,
                )
                .ok()
            })
            .collect();
        let keyword_words = tokenizer::remove_stop_words(&keyword_words, &self.stop_words);

        let mut created_words: Vec<DumpedWord> = Vec::new();
        let mut mappings: Vec<DumpedWordMapping> = Vec::new();
        let mut stored = 0usize;

        for info in title_words
            .iter()
            .chain(keyword_words.iter())
            .chain(content_words.iter())
        {
            let word = match self.words.entry(info.text().to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let id = self.next_word_id;
                    // The text is already normalized and non-empty, so
                    // construction cannot fail.
                    let Ok(word) = Word::new(id, info.text()) else {
                        continue;
                    };
                    self.next_word_id += 1;
                    created_words.push(DumpedWord::from_word(&word));
                    entry.insert(word)
                }
            };
            word.add_occurrence(&name, info.first_char_index(), info.word_index(), info.location());
            mappings.push(DumpedWordMapping::new(
                word.id(),
                document_id,
                info.first_char_index(),
                info.word_index(),
                info.location().code(),
            ));
            stored += 1;
        }

        self.documents.insert(
            name.clone(),
            IndexedDocument {
                id: document_id,
                document: Arc::clone(&document),
            },
        );

        debug!(
            document = %name,
            occurrences = stored,
            new_words = created_words.len(),
            "document stored"
        );

        let change_data = DumpedChange::new(
            DumpedDocument::from_document(document_id, &*document),
            created_words,
            mappings,
        );
        let storer_result = self.notify(
            Some(&*document),
            IndexChange::DocumentAdded,
            Some(&change_data),
            state,
        );
        if let Some(result) = storer_result {
            self.adopt_identifiers(&name, &result);
        }

        stored
    }

    /// Adopt permanent ids assigned by the storer in response to a
    /// `DocumentAdded` event.
    fn adopt_identifiers(&mut self, document_name: &str, result: &IndexStorerResult) {
        if let Some(document_id) = result.document_id {
            if let Some(entry) = self.documents.get_mut(document_name) {
                entry.id = document_id;
            }
            self.next_document_id = self.next_document_id.max(document_id + 1);
        }
        for word_id in &result.word_ids {
            if let Some(word) = self.words.get_mut(&word_id.text) {
                word.set_id(word_id.id);
            }
            self.next_word_id = self.next_word_id.max(word_id.id + 1);
        }
    }

    /// Remove every trace of the document with `document.name()`.
    ///
    /// Works by name, so any instance carrying the right name removes the
    /// stored one. The `DocumentRemoved` payload lists every removed
    /// occurrence edge and the terms pruned from the dictionary because
    /// this document held their last occurrence.
    pub fn remove_document(&mut self, document: &dyn Document, state: Option<&dyn Any>) {
        let name = document.name().to_string();
        let document_id = self
            .documents
            .get(&name)
            .map(|entry| entry.id)
            .unwrap_or(0);

        let mut removed_mappings: Vec<DumpedWordMapping> = Vec::new();
        let mut pruned_words: Vec<DumpedWord> = Vec::new();

        self.words.retain(|_, word| {
            if let Some(positions) = word.remove_occurrences(&name) {
                for position in &positions {
                    removed_mappings.push(DumpedWordMapping::from_info(
                        word.id(),
                        document_id,
                        position,
                    ));
                }
            }
            if word.occurrences().is_empty() {
                pruned_words.push(DumpedWord::from_word(word));
                false
            } else {
                true
            }
        });

        self.documents.remove(&name);

        debug!(
            document = %name,
            removed_occurrences = removed_mappings.len(),
            pruned_words = pruned_words.len(),
            "document removed"
        );

        let change_data = DumpedChange::new(
            DumpedDocument::from_document(document_id, document),
            pruned_words,
            removed_mappings,
        );
        self.notify(
            Some(document),
            IndexChange::DocumentRemoved,
            Some(&change_data),
            state,
        );
    }

    /// Drop all documents, terms, and occurrences. Fires a single
    /// `IndexCleared` event with no payload.
    pub fn clear(&mut self, state: Option<&dyn Any>) {
        self.words.clear();
        self.documents.clear();
        self.next_document_id = 1;
        self.next_word_id = 1;

        debug!("index cleared");

        self.notify(None, IndexChange::IndexCleared, None, state);
    }

    /// Rebuild the index from dump records, replacing any current content.
    ///
    /// Requires a rehydrator (see [`InMemoryIndex::set_rehydrator`]).
    /// Documents the rehydrator declines to rebuild keep their occurrences
    /// in the dictionary but are left out of the registry, so they never
    /// surface in search results. No change events are fired.
    pub fn initialize_data(
        &mut self,
        documents: &[DumpedDocument],
        words: &[DumpedWord],
        mappings: &[DumpedWordMapping],
    ) -> Result<()> {
        let rehydrator = self.rehydrator.as_ref().ok_or(Error::RehydratorNotSet)?;

        // Rehydrate everything up front so a panicking host callback cannot
        // leave the index half-replaced.
        let rehydrated: Vec<(DumpedDocument, Option<Arc<dyn Document>>)> = documents
            .iter()
            .map(|dumped| (dumped.clone(), rehydrator(dumped)))
            .collect();

        self.words.clear();
        self.documents.clear();

        let mut names_by_id: HashMap<u32, String> = HashMap::new();
        let mut max_document_id = 0u32;
        for (dumped, live) in rehydrated {
            max_document_id = max_document_id.max(dumped.id);
            names_by_id.insert(dumped.id, dumped.name.clone());
            if let Some(document) = live {
                self.documents.insert(
                    dumped.name,
                    IndexedDocument {
                        id: dumped.id,
                        document,
                    },
                );
            }
        }

        let mut texts_by_id: HashMap<u32, String> = HashMap::new();
        let mut max_word_id = 0u32;
        for dumped in words {
            max_word_id = max_word_id.max(dumped.id);
            texts_by_id.insert(dumped.id, dumped.text.clone());
            let word = Word::new(dumped.id, &dumped.text)?;
            self.words.insert(word.text().to_string(), word);
        }

        // Mappings referencing unknown word or document ids are skipped.
        for mapping in mappings {
            let (Some(text), Some(name)) = (
                texts_by_id.get(&mapping.word_id),
                names_by_id.get(&mapping.document_id),
            ) else {
                continue;
            };
            let Some(location) = WordLocation::from_code(mapping.location) else {
                continue;
            };
            if let Some(word) = self.words.get_mut(text) {
                word.add_occurrence(name, mapping.first_char_index, mapping.word_index, location);
            }
        }

        self.next_document_id = max_document_id + 1;
        self.next_word_id = max_word_id + 1;

        debug!(
            documents = self.documents.len(),
            words = self.words.len(),
            "index initialized from dump"
        );

        Ok(())
    }

    /// Run a query. See [`SearchParameters`] for modes and filtering.
    pub fn search(&self, parameters: &SearchParameters) -> SearchResultCollection {
        search::run(self, parameters)
    }

    fn notify(
        &mut self,
        document: Option<&dyn Document>,
        change: IndexChange,
        change_data: Option<&DumpedChange>,
        state: Option<&dyn Any>,
    ) -> Option<IndexStorerResult> {
        let callback = self.change_callback.as_mut()?;
        let event = IndexEvent {
            document,
            change,
            change_data,
            state,
        };
        callback(&event)
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        InMemoryIndex::new()
    }
}

impl std::fmt::Debug for InMemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIndex")
            .field("total_words", &self.total_words())
            .field("total_documents", &self.total_documents())
            .field("total_occurrences", &self.total_occurrences())
            .finish_non_exhaustive()
    }
}
