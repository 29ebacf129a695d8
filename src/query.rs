//! Query parameters.

use crate::error::{Error, Result};

/// How query words combine into a match predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchOptions {
    /// A document matches if it contains any query word.
    #[default]
    AtLeastOneWord,
    /// A document matches if it contains every query word, anywhere.
    AllWords,
    /// A document matches if it contains every query word at consecutive
    /// ordinals, in query order.
    ExactPhrase,
}

/// A validated search request: the raw query string, an optional type-tag
/// filter, and the match mode.
#[derive(Debug, Clone)]
pub struct SearchParameters {
    query: String,
    type_tags: Option<Vec<String>>,
    options: SearchOptions,
}

impl SearchParameters {
    /// A query over all document types with the default
    /// [`SearchOptions::AtLeastOneWord`] mode.
    pub fn new(query: &str) -> Result<Self> {
        SearchParameters::build(query, None, SearchOptions::default())
    }

    /// A query restricted to documents whose type tag appears in `type_tags`.
    ///
    /// The filter list must be non-empty and contain no empty tags. To search
    /// all types, use [`SearchParameters::new`] or
    /// [`SearchParameters::with_options`] instead.
    pub fn with_type_tags(query: &str, type_tags: &[&str], options: SearchOptions) -> Result<Self> {
        if type_tags.is_empty() {
            return Err(Error::EmptyTypeTags);
        }
        if type_tags.iter().any(|tag| tag.is_empty()) {
            return Err(Error::EmptyArgument("type_tags"));
        }
        let tags = type_tags.iter().map(|tag| (*tag).to_string()).collect();
        SearchParameters::build(query, Some(tags), options)
    }

    /// A query over all document types with an explicit match mode.
    pub fn with_options(query: &str, options: SearchOptions) -> Result<Self> {
        SearchParameters::build(query, None, options)
    }

    fn build(query: &str, type_tags: Option<Vec<String>>, options: SearchOptions) -> Result<Self> {
        if query.is_empty() {
            return Err(Error::EmptyArgument("query"));
        }
        Ok(SearchParameters {
            query: query.to_string(),
            type_tags,
            options,
        })
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The type-tag filter; `None` means all types.
    pub fn type_tags(&self) -> Option<&[String]> {
        self.type_tags.as_deref()
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }
}
