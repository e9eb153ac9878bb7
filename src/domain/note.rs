//! Free-form study notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note identifier
    pub id: String,

    /// Note body
    pub text: String,

    /// When the note was written
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
