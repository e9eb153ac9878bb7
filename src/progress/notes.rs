//! Note book record.

use serde::{Deserialize, Serialize};

use super::ProgressError;
use crate::domain::Note;

/// All user notes, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note; blank text is rejected
    pub fn add(&mut self, text: &str) -> Result<Note, ProgressError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ProgressError::EmptyNote);
        }

        let note = Note::new(text);
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Remove a note by id or unique id prefix
    pub fn remove(&mut self, id: &str) -> Result<Note, ProgressError> {
        let matches: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.id == id || (!id.is_empty() && n.id.starts_with(id)))
            .map(|(idx, _)| idx)
            .collect();

        match matches.as_slice() {
            [idx] => Ok(self.notes.remove(*idx)),
            [] => Err(ProgressError::NoteNotFound(id.to_string())),
            _ => Err(ProgressError::AmbiguousNoteId(id.to_string())),
        }
    }

    /// Notes, newest first
    pub fn list(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_add_rejects_blank_text() {
        let mut book = NoteBook::new();
        assert!(matches!(book.add("   "), Err(ProgressError::EmptyNote)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_list_is_newest_first() {
        let mut book = NoteBook::new();
        let older = book.add("first").unwrap();
        book.add("second").unwrap();

        // Backdate the first note so ordering does not depend on clock resolution
        book.notes[0].created_at = Utc::now() - Duration::minutes(5);

        let listed: Vec<_> = book.list().into_iter().map(|n| n.text.as_str()).collect();
        assert_eq!(listed, vec!["second", "first"]);
        assert_eq!(book.notes[0].id, older.id);
    }

    #[test]
    fn test_remove_by_prefix() {
        let mut book = NoteBook::new();
        let note = book.add("remember event delegation").unwrap();

        let removed = book.remove(&note.id[..8]).unwrap();
        assert_eq!(removed.text, "remember event delegation");
        assert!(matches!(book.remove(&note.id), Err(ProgressError::NoteNotFound(_))));
    }

    #[test]
    fn test_parses_persisted_shape() {
        let json = r#"[{"id": "n1", "text": "hello", "createdAt": "2024-01-01T00:00:00Z"}]"#;
        let book: NoteBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.list()[0].text, "hello");
    }
}
