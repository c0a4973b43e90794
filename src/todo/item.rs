use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single list entry.
///
/// Serialized with camelCase keys so the persisted `todos` value reads as
/// `{"id": 1718000000000, "text": "...", "completed": false, "createdAt": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Builds an item from already-trimmed text.
    pub fn new(id: i64, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Returns the trimmed text, or `None` when nothing is left after trimming.
pub fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
