//! Structural locations of words inside a document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a word occurrence came from within its document.
///
/// The variants form a total order by their wire code
/// (`Title` < `Keywords` < `Content`), and each carries a fixed relevance
/// weight used by the scoring phase of a search:
///
/// | Location   | Code | Weight |
/// |------------|------|--------|
/// | `Title`    | 1    | 2.0    |
/// | `Keywords` | 2    | 1.5    |
/// | `Content`  | 3    | 1.0    |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WordLocation {
    /// The word is in the title of a document.
    Title = 1,
    /// The word is in the keywords of a document.
    Keywords = 2,
    /// The word is in the content of a document.
    Content = 3,
}

impl WordLocation {
    /// The numeric code recorded in dumped mappings.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a dumped code back to a location.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WordLocation::Title),
            2 => Some(WordLocation::Keywords),
            3 => Some(WordLocation::Content),
            _ => None,
        }
    }

    /// The relative relevance weight of an occurrence at this location.
    pub fn relative_relevance(self) -> f32 {
        match self {
            WordLocation::Title => 2.0,
            WordLocation::Keywords => 1.5,
            WordLocation::Content => 1.0,
        }
    }
}

impl fmt::Display for WordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WordLocation::Title => "Title",
            WordLocation::Keywords => "Keywords",
            WordLocation::Content => "Content",
        };
        f.write_str(label)
    }
}
