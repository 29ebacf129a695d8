//! Error types for index construction, mutation, and search.

use thiserror::Error;

/// Errors surfaced by the index and its value types.
///
/// Every variant is a precondition or state-transition violation raised
/// immediately at the offending call; no operation leaves the index
/// partially mutated after returning an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required string argument was empty.
    #[error("{0} cannot be empty")]
    EmptyArgument(&'static str),

    /// A document-type-tag filter was supplied but contained no tags.
    #[error("document type tags cannot be empty")]
    EmptyTypeTags,

    /// A relevance value or total was negative.
    #[error("relevance values must be greater than or equal to zero")]
    NegativeRelevance,

    /// The relevance was already finalized and cannot be changed.
    #[error("the relevance value is already finalized")]
    AlreadyFinalized,

    /// Normalization requires a finalized relevance.
    #[error("the relevance value has not been finalized")]
    NotFinalized,

    /// `initialize_data` was invoked before a rehydrator was registered.
    #[error("a document rehydrator must be set before initializing dumped data")]
    RehydratorNotSet,

    /// A result for the same document was already collected.
    #[error("document `{0}` is already present in the collection")]
    DuplicateDocument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
