//! Persisted study state: learned topics and notes.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.fekb/
//! ├── learned-topics.json   # {"<meta-category>": ["<topic id>", ...]}
//! └── notes.json            # [{"id", "text", "createdAt"}, ...]
//! ```

pub mod learned;
pub mod notes;
pub mod store;

use std::path::Path;

use thiserror::Error;

pub use learned::{LearnedTopics, Progress};
pub use notes::NoteBook;
pub use store::JsonStore;

/// Storage key (file name) of the learned-topics record
pub const LEARNED_TOPICS_FILE: &str = "learned-topics.json";

/// Storage key (file name) of the notes record
pub const NOTES_FILE: &str = "notes.json";

/// Errors from the persisted-state layer
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Note text is empty")]
    EmptyNote,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Note id prefix is ambiguous: {0}")]
    AmbiguousNoteId(String),
}

/// Learned-topics store under a home directory
pub fn learned_store(home: &Path) -> JsonStore<LearnedTopics> {
    JsonStore::new(home.join(LEARNED_TOPICS_FILE))
}

/// Notes store under a home directory
pub fn notes_store(home: &Path) -> JsonStore<NoteBook> {
    JsonStore::new(home.join(NOTES_FILE))
}
