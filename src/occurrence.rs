//! Positional facts about word occurrences.
//!
//! # Invariants
//!
//! - **POSITION_ORDERING**: occurrences order by `(location, word_index)`
//!   only. `first_char_index` participates in *equality* but not in
//!   ordering, so a [`SortedPositionSet`] holds at most one occurrence per
//!   `(location, word_index)` slot.
//! - **SET_SORTED**: a `SortedPositionSet` is always sorted under
//!   [`BasicWordInfo::position_cmp`].

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::location::WordLocation;
use crate::tokenizer;

/// One appearance of a term in a document: char offset, word ordinal, and
/// structural location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasicWordInfo {
    first_char_index: u16,
    word_index: u16,
    location: WordLocation,
}

impl BasicWordInfo {
    pub fn new(first_char_index: u16, word_index: u16, location: WordLocation) -> Self {
        BasicWordInfo {
            first_char_index,
            word_index,
            location,
        }
    }

    /// Char offset of the first character of the word in the original text.
    #[inline]
    pub fn first_char_index(self) -> u16 {
        self.first_char_index
    }

    /// Zero-based ordinal of the word within its tokenized field.
    #[inline]
    pub fn word_index(self) -> u16 {
        self.word_index
    }

    #[inline]
    pub fn location(self) -> WordLocation {
        self.location
    }

    /// Positional ordering: location first, then word ordinal.
    ///
    /// The char offset is deliberately excluded, so two occurrences that are
    /// not value-equal can still compare as equal. This is not an [`Ord`]
    /// impl for that reason.
    pub fn position_cmp(&self, other: &BasicWordInfo) -> Ordering {
        self.location
            .cmp(&other.location)
            .then(self.word_index.cmp(&other.word_index))
    }
}

/// A [`BasicWordInfo`] together with the normalized text of the word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordInfo {
    text: String,
    position: BasicWordInfo,
}

impl WordInfo {
    /// Build a word occurrence, normalizing `text` to canonical term form.
    ///
    /// Fails with [`Error::EmptyArgument`] when `text` is empty or
    /// normalizes to nothing.
    pub fn new(
        text: &str,
        first_char_index: u16,
        word_index: u16,
        location: WordLocation,
    ) -> Result<Self> {
        let normalized = tokenizer::remove_diacritics_and_punctuation(text, true);
        if normalized.is_empty() {
            return Err(Error::EmptyArgument("text"));
        }
        Ok(WordInfo {
            text: normalized,
            position: BasicWordInfo::new(first_char_index, word_index, location),
        })
    }

    /// The normalized (lower-cased, stripped) text of the word.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn first_char_index(&self) -> u16 {
        self.position.first_char_index()
    }

    #[inline]
    pub fn word_index(&self) -> u16 {
        self.position.word_index()
    }

    #[inline]
    pub fn location(&self) -> WordLocation {
        self.position.location()
    }

    /// The positional part of this occurrence.
    #[inline]
    pub fn basic(&self) -> BasicWordInfo {
        self.position
    }

    /// Positional ordering with the text as a final tiebreak.
    pub fn position_cmp(&self, other: &WordInfo) -> Ordering {
        self.position
            .position_cmp(&other.position)
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// A per-document set of occurrence positions, kept sorted by
/// [`BasicWordInfo::position_cmp`].
///
/// Insertion de-duplicates by positional comparison: a second occurrence in
/// the same `(location, word_index)` slot is rejected even when its char
/// offset differs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedPositionSet {
    items: Vec<BasicWordInfo>,
}

impl SortedPositionSet {
    pub fn new() -> Self {
        SortedPositionSet::default()
    }

    /// Insert an occurrence, returning whether it was added.
    pub fn add(&mut self, item: BasicWordInfo) -> bool {
        match self.items.binary_search_by(|probe| probe.position_cmp(&item)) {
            Ok(_) => false,
            Err(index) => {
                self.items.insert(index, item);
                true
            }
        }
    }

    /// Whether a value-equal occurrence is present.
    pub fn contains(&self, item: &BasicWordInfo) -> bool {
        self.items
            .binary_search_by(|probe| probe.position_cmp(item))
            .map(|index| self.items[index] == *item)
            .unwrap_or(false)
    }

    /// Remove a value-equal occurrence, returning whether one was removed.
    pub fn remove(&mut self, item: &BasicWordInfo) -> bool {
        match self.items.binary_search_by(|probe| probe.position_cmp(item)) {
            Ok(index) if self.items[index] == *item => {
                self.items.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Whether any occurrence sits at `word_index` (in any location).
    pub fn contains_word_index(&self, word_index: u16) -> bool {
        self.items.iter().any(|item| item.word_index() == word_index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&BasicWordInfo> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BasicWordInfo> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a SortedPositionSet {
    type Item = &'a BasicWordInfo;
    type IntoIter = std::slice::Iter<'a, BasicWordInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<BasicWordInfo> for SortedPositionSet {
    fn from_iter<I: IntoIterator<Item = BasicWordInfo>>(iter: I) -> Self {
        let mut set = SortedPositionSet::new();
        for item in iter {
            set.add(item);
        }
        set
    }
}
