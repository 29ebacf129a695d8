//! Embeddable in-memory full-text search with positional matching and
//! change notification.
//!
//! The crate indexes documents supplied by the host application into a
//! positional inverted index: every occurrence of every word is stored with
//! its character offset, word ordinal, and structural location (title,
//! keywords, or content). Queries run in three modes (any word, all words,
//! exact phrase) and return results scored as percentages of the result
//! set's total relevance, weighted by where in the document each word
//! appears.
//!
//! The index itself is volatile. Persistence stays in the host: a change
//! callback delivers a flat delta payload synchronously inside every
//! mutation, and [`InMemoryIndex::initialize_data`] rebuilds the index from
//! those payloads at startup.
//!
//! # Usage
//!
//! ```ignore
//! use findex::{InMemoryIndex, SearchParameters};
//!
//! let mut index = InMemoryIndex::new();
//! index.store_document(doc, &[], "some document text", None);
//!
//! let results = index.search(&SearchParameters::new("text")?);
//! ```

mod document;
mod dump;
mod error;
mod index;
mod location;
mod occurrence;
mod query;
mod relevance;
mod results;
mod search;
mod tokenizer;
mod word;

pub use document::Document;
pub use dump::{
    ChangeCallback, DumpedChange, DumpedDocument, DumpedWord, DumpedWordMapping, IndexChange,
    IndexEvent, IndexStorerResult, Rehydrator, WordId,
};
pub use error::{Error, Result};
pub use index::InMemoryIndex;
pub use location::WordLocation;
pub use occurrence::{BasicWordInfo, SortedPositionSet, WordInfo};
pub use query::{SearchOptions, SearchParameters};
pub use relevance::Relevance;
pub use results::{SearchResult, SearchResultCollection, WordInfoCollection};
pub use tokenizer::{
    is_split_char, remove_diacritics_and_punctuation, remove_stop_words, tokenize,
};
pub use word::Word;
