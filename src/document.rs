//! The document capability consumed by the index.

use chrono::{DateTime, Utc};

use crate::occurrence::WordInfo;

/// A searchable document, supplied by the host application.
///
/// The index never constructs documents; it only calls through this trait.
/// Identity is the `name()` string: two instances with equal names are the
/// same document for indexing purposes, and all internal maps key on an
/// owned copy of the name rather than on the instance itself.
pub trait Document {
    /// Stable, unique, non-empty identity key.
    fn name(&self) -> &str;

    /// Display title. Indexed at [`WordLocation::Title`](crate::WordLocation::Title).
    fn title(&self) -> &str;

    /// Type tag used for search-time filtering (e.g. `"ptdoc"`).
    fn type_tag(&self) -> &str;

    /// Last-modification timestamp, carried through to dump records.
    fn date_time(&self) -> DateTime<Utc>;

    /// Tokenize a text fragment belonging to this document.
    ///
    /// The document decides how the fragment maps to locations: typically a
    /// fragment equal to the title is tagged `Title` and everything else is
    /// tagged `Content`, but structured document kinds may do more.
    fn tokenize(&self, text: &str) -> Vec<WordInfo>;
}
