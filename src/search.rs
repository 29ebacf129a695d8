//! Query execution.
//!
//! The query string goes through the same tokenization pipeline as indexed
//! content, including stop-word removal, so queries and stored occurrences
//! always agree on term form.

use std::collections::HashMap;

use crate::index::InMemoryIndex;
use crate::location::WordLocation;
use crate::occurrence::{SortedPositionSet, WordInfo};
use crate::query::{SearchOptions, SearchParameters};
use crate::relevance::Relevance;
use crate::results::{SearchResult, SearchResultCollection};
use crate::tokenizer;

pub(crate) fn run(index: &InMemoryIndex, parameters: &SearchParameters) -> SearchResultCollection {
    let query_words = tokenizer::remove_stop_words(
        &tokenizer::tokenize(parameters.query(), WordLocation::Content),
        index.stop_words(),
    );
    if query_words.is_empty() {
        return SearchResultCollection::new();
    }

    // Distinct terms in first-appearance order, plus the full query sequence
    // as term indices (duplicates preserved for phrase matching).
    let mut terms: Vec<&str> = Vec::new();
    let mut sequence: Vec<usize> = Vec::with_capacity(query_words.len());
    for word in &query_words {
        let term_index = match terms.iter().position(|term| *term == word.text()) {
            Some(index) => index,
            None => {
                terms.push(word.text());
                terms.len() - 1
            }
        };
        sequence.push(term_index);
    }

    // Per candidate document: one position set slot per distinct term.
    let mut candidates: HashMap<&str, Vec<Option<&SortedPositionSet>>> = HashMap::new();
    for (term_index, term) in terms.iter().enumerate() {
        let Some(word) = index.word(term) else {
            continue;
        };
        for (document_name, positions) in word.occurrences() {
            let Some(entry) = index.document_entry(document_name) else {
                // Occurrences of a document the rehydrator could not rebuild.
                continue;
            };
            if let Some(tags) = parameters.type_tags() {
                if !tags.iter().any(|tag| tag == entry.document.type_tag()) {
                    continue;
                }
            }
            candidates
                .entry(document_name.as_str())
                .or_insert_with(|| vec![None; terms.len()])[term_index] = Some(positions);
        }
    }

    let matched: Vec<(&str, Vec<Option<&SortedPositionSet>>)> = candidates
        .into_iter()
        .filter(|(_, slots)| match parameters.options() {
            SearchOptions::AtLeastOneWord => true,
            SearchOptions::AllWords => slots.iter().all(Option::is_some),
            SearchOptions::ExactPhrase => {
                slots.iter().all(Option::is_some) && phrase_matches(&sequence, slots)
            }
        })
        .collect();

    // Raw relevance of a document is the sum of the location weights over
    // the distinct (term, location) pairs it matched. The total over the
    // result set turns each raw value into a percentage.
    let mut total = 0.0f32;
    let mut scored: Vec<(&str, Vec<Option<&SortedPositionSet>>, f32)> = Vec::new();
    for (document_name, slots) in matched {
        let mut raw = 0.0f32;
        for positions in slots.iter().flatten() {
            for location in [
                WordLocation::Title,
                WordLocation::Keywords,
                WordLocation::Content,
            ] {
                if positions.iter().any(|info| info.location() == location) {
                    raw += location.relative_relevance();
                }
            }
        }
        total += raw;
        scored.push((document_name, slots, raw));
    }

    let mut results = SearchResultCollection::new();
    for (document_name, slots, raw) in scored {
        let Some(entry) = index.document_entry(document_name) else {
            continue;
        };
        let mut result = SearchResult::new(std::sync::Arc::clone(&entry.document));
        for (term_index, positions) in slots.iter().enumerate() {
            let Some(positions) = positions else {
                continue;
            };
            for info in *positions {
                if let Ok(word_info) = WordInfo::new(
                    terms[term_index],
                    info.first_char_index(),
                    info.word_index(),
                    info.location(),
                ) {
                    result.matches_mut().add(word_info);
                }
            }
        }
        *result.relevance_mut() = Relevance::Finalized(raw / total * 100.0);
        // Candidate keys are unique document names, so no duplicate check
        // is needed.
        results.push_unchecked(result);
    }

    results
}

/// Whether the document contains the query sequence at consecutive ordinals.
///
/// Every candidate start is an ordinal of the first query word; the phrase
/// matches if each subsequent word occurs exactly one ordinal later,
/// regardless of location.
fn phrase_matches(sequence: &[usize], slots: &[Option<&SortedPositionSet>]) -> bool {
    let Some(first) = sequence.first().and_then(|&term| slots[term]) else {
        return false;
    };
    first.iter().any(|start| {
        sequence.iter().enumerate().all(|(offset, &term)| {
            slots[term].is_some_and(|positions| {
                positions.contains_word_index(start.word_index().wrapping_add(offset as u16))
            })
        })
    })
}
