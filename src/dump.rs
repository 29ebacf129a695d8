//! Dump records and change notification plumbing.
//!
//! Dump records are the flat, serializable projection of index state that
//! crosses the boundary between the in-memory index and whatever durable
//! store the host application maintains. They carry plain values only, never
//! references into the live index.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::occurrence::BasicWordInfo;
use crate::word::Word;

/// Flat snapshot of one indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedDocument {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub type_tag: String,
    pub date_time: DateTime<Utc>,
}

impl DumpedDocument {
    /// Build a record from raw parts, validating the identity fields.
    pub fn new(
        id: u32,
        name: &str,
        title: &str,
        type_tag: &str,
        date_time: DateTime<Utc>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyArgument("name"));
        }
        if title.is_empty() {
            return Err(Error::EmptyArgument("title"));
        }
        if type_tag.is_empty() {
            return Err(Error::EmptyArgument("type_tag"));
        }
        Ok(DumpedDocument {
            id,
            name: name.to_string(),
            title: title.to_string(),
            type_tag: type_tag.to_string(),
            date_time,
        })
    }

    /// Snapshot a live document under the given index-assigned id.
    pub fn from_document(id: u32, document: &dyn Document) -> Self {
        DumpedDocument {
            id,
            name: document.name().to_string(),
            title: document.title().to_string(),
            type_tag: document.type_tag().to_string(),
            date_time: document.date_time(),
        }
    }
}

/// Flat snapshot of one dictionary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedWord {
    pub id: u32,
    pub text: String,
}

impl DumpedWord {
    pub fn new(id: u32, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyArgument("text"));
        }
        Ok(DumpedWord {
            id,
            text: text.to_string(),
        })
    }

    pub fn from_word(word: &Word) -> Self {
        DumpedWord {
            id: word.id(),
            text: word.text().to_string(),
        }
    }
}

/// One word-to-document occurrence edge, by numeric ids.
///
/// `location` is the stable wire code of [`WordLocation`], see
/// [`WordLocation::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedWordMapping {
    pub word_id: u32,
    pub document_id: u32,
    pub first_char_index: u16,
    pub word_index: u16,
    pub location: u8,
}

impl DumpedWordMapping {
    pub fn new(
        word_id: u32,
        document_id: u32,
        first_char_index: u16,
        word_index: u16,
        location: u8,
    ) -> Self {
        DumpedWordMapping {
            word_id,
            document_id,
            first_char_index,
            word_index,
            location,
        }
    }

    pub fn from_info(word_id: u32, document_id: u32, info: &BasicWordInfo) -> Self {
        DumpedWordMapping {
            word_id,
            document_id,
            first_char_index: info.first_char_index(),
            word_index: info.word_index(),
            location: info.location().code(),
        }
    }
}

/// The kind of mutation a change event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexChange {
    DocumentAdded,
    DocumentRemoved,
    IndexCleared,
}

/// The delta payload of a single mutation.
///
/// For `DocumentAdded`: `words` lists only the terms *created* by the
/// mutation (terms that already existed in the dictionary are omitted), while
/// `mappings` lists every occurrence edge the mutation added. For
/// `DocumentRemoved`: `words` lists the terms pruned because their last
/// occurrence vanished, and `mappings` lists every edge removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedChange {
    pub document: DumpedDocument,
    pub words: Vec<DumpedWord>,
    pub mappings: Vec<DumpedWordMapping>,
}

impl DumpedChange {
    pub fn new(
        document: DumpedDocument,
        words: Vec<DumpedWord>,
        mappings: Vec<DumpedWordMapping>,
    ) -> Self {
        DumpedChange {
            document,
            words,
            mappings,
        }
    }
}

/// A permanent id the storer assigned to a term, keyed by term text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordId {
    pub text: String,
    pub id: u32,
}

impl WordId {
    pub fn new(text: &str, id: u32) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyArgument("text"));
        }
        Ok(WordId {
            text: text.to_string(),
            id,
        })
    }
}

/// Identifiers assigned by the storer in response to a change event.
///
/// Returned from the change callback after a `DocumentAdded` event so the
/// index can swap its transient ids for the store's permanent ones. A `None`
/// return (or `None`/empty fields) leaves the transient ids in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStorerResult {
    pub document_id: Option<u32>,
    pub word_ids: Vec<WordId>,
}

/// A change event, handed to the host synchronously during the mutation.
pub struct IndexEvent<'a> {
    /// The live document involved, when one is available. `IndexCleared`
    /// carries no document; removal of a name that was never indexed may
    /// carry one anyway, so the host can clean up its store.
    pub document: Option<&'a dyn Document>,
    pub change: IndexChange,
    /// The delta payload. Always present for document changes, absent for
    /// `IndexCleared`.
    pub change_data: Option<&'a DumpedChange>,
    /// Opaque host state threaded through from the mutating call.
    pub state: Option<&'a dyn Any>,
}

/// Synchronous change notification hook.
///
/// Invoked once per mutation, inside the mutating call, after the in-memory
/// structures are updated. The mutation does not complete until the callback
/// returns, which is what makes persistence at-least-once: a host that
/// writes the payload durably before returning never observes an in-memory
/// change it has not been told about.
pub type ChangeCallback = Box<dyn FnMut(&IndexEvent<'_>) -> Option<IndexStorerResult>>;

/// Turns a dumped document back into a live one during bulk initialization.
///
/// Returning `None` marks the document unavailable; the index records its
/// occurrences anyway but excludes it from search results.
pub type Rehydrator = Box<dyn Fn(&DumpedDocument) -> Option<std::sync::Arc<dyn Document>>>;
