//! Shared test fixtures: mock documents and an in-memory storer.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use findex::{
    ChangeCallback, Document, DumpedChange, DumpedDocument, DumpedWord, DumpedWordMapping,
    IndexChange, Rehydrator, WordInfo, WordLocation,
};

// ============================================================================
// REFERENCE CONTENT
// ============================================================================

/// Tokenizes to (this, 0, 0), (is, 5, 1), (some, 8, 2), (content, 13, 3).
pub const CONTENT_1: &str = "This is some content.";

/// Tokenizes to 6 words: dummy, text, used, for, testing, purposes.
pub const CONTENT_2: &str = "Dummy text used for testing purposes.";

/// Tokenizes to a single word: todo.
pub const CONTENT_3: &str = "Todo.";

/// Tokenizes to (content, 0, 0), (with, 8, 1), (repeated, 13, 2),
/// (content, 22, 3).
pub const CONTENT_4: &str = "Content with repeated content.";

// ============================================================================
// MOCK DOCUMENT
// ============================================================================

pub struct MockDocument {
    name: String,
    title: String,
    type_tag: String,
    date_time: DateTime<Utc>,
}

impl MockDocument {
    pub fn new(name: &str, title: &str, type_tag: &str) -> Self {
        MockDocument {
            name: name.to_string(),
            title: title.to_string(),
            type_tag: type_tag.to_string(),
            date_time: Utc::now(),
        }
    }
}

impl Document for MockDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    fn tokenize(&self, text: &str) -> Vec<WordInfo> {
        let location = if text == self.title {
            WordLocation::Title
        } else {
            WordLocation::Content
        };
        findex::tokenize(text, location)
    }
}

pub fn mock_document(name: &str, title: &str, type_tag: &str) -> Arc<dyn Document> {
    Arc::new(MockDocument::new(name, title, type_tag))
}

// ============================================================================
// EVENT RECORDING
// ============================================================================

/// One observed change event, with the payload cloned out of the borrow.
pub struct RecordedEvent {
    pub change: IndexChange,
    pub document_name: Option<String>,
    pub data: Option<DumpedChange>,
}

/// A callback that records every event and assigns no identifiers.
pub fn recording_callback() -> (Rc<RefCell<Vec<RecordedEvent>>>, ChangeCallback) {
    let log: Rc<RefCell<Vec<RecordedEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let callback: ChangeCallback = Box::new(move |event| {
        sink.borrow_mut().push(RecordedEvent {
            change: event.change,
            document_name: event.document.map(|d| d.name().to_string()),
            data: event.change_data.cloned(),
        });
        None
    });
    (log, callback)
}

// ============================================================================
// IN-MEMORY STORER
// ============================================================================

/// The durable state a host storer would maintain, replayed from change
/// events. Used to exercise the full persist-and-rebuild cycle.
#[derive(Default)]
pub struct StoreState {
    pub documents: Vec<DumpedDocument>,
    pub words: Vec<DumpedWord>,
    pub mappings: Vec<DumpedWordMapping>,
}

pub fn memory_storer() -> (Rc<RefCell<StoreState>>, ChangeCallback) {
    let state: Rc<RefCell<StoreState>> = Rc::new(RefCell::new(StoreState::default()));
    let sink = Rc::clone(&state);
    let callback: ChangeCallback = Box::new(move |event| {
        let mut store = sink.borrow_mut();
        match event.change {
            IndexChange::DocumentAdded => {
                if let Some(data) = event.change_data {
                    store.documents.push(data.document.clone());
                    store.words.extend(data.words.iter().cloned());
                    store.mappings.extend(data.mappings.iter().cloned());
                }
            }
            IndexChange::DocumentRemoved => {
                if let Some(data) = event.change_data {
                    store.documents.retain(|d| d.name != data.document.name);
                    store
                        .words
                        .retain(|w| data.words.iter().all(|pruned| pruned.id != w.id));
                    store.mappings.retain(|m| !data.mappings.contains(m));
                }
            }
            IndexChange::IndexCleared => {
                store.documents.clear();
                store.words.clear();
                store.mappings.clear();
            }
        }
        None
    });
    (state, callback)
}

/// A rehydrator that rebuilds mock documents straight from the dump record.
pub fn mock_rehydrator() -> Rehydrator {
    Box::new(|dumped| Some(mock_document(&dumped.name, &dumped.title, &dumped.type_tag)))
}
