use super::item::normalize_text;
use super::TodoItem;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Ordered collection of items, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a list from loaded items. Text is trimmed, blank items are dropped
    /// and any later item that reuses an id is dropped.
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter_map(|mut item| {
                let text = normalize_text(&item.text)?;
                if text.len() != item.text.len() {
                    item.text = text.to_string();
                }
                Some(item)
            })
            .filter(|item| seen.insert(item.id))
            .collect();
        Self { items }
    }

    pub fn add(&mut self, text: &str) -> Option<i64> {
        self.add_at(text, Utc::now())
    }

    /// Inserts a new item at the front. Returns the new id, or `None` when the
    /// text is empty after trimming.
    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Option<i64> {
        let text = normalize_text(text)?;
        let id = self.next_id(now);
        self.items.insert(0, TodoItem::new(id, text, now));
        Some(id)
    }

    /// Creation time in milliseconds, bumped past every existing id so two items
    /// created within the same millisecond never collide. Once `i64::MAX` is taken
    /// the lowest unused non-negative id is used instead.
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.items.iter().map(|item| item.id).max() {
            Some(max_id) if max_id >= candidate => max_id
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_free_id()),
            _ => candidate,
        }
    }

    fn lowest_free_id(&self) -> i64 {
        let used: HashSet<i64> = self.items.iter().map(|item| item.id).collect();
        (0..).find(|id| !used.contains(id)).unwrap_or_default()
    }

    pub fn toggle(&mut self, id: i64) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.toggle();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Replaces the text of an item. Empty text is discarded and the old text kept.
    pub fn edit(&mut self, id: i64, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            return false;
        };
        match self.get_mut(id) {
            Some(item) => {
                item.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(TodoItem::is_active);
        before - self.items.len()
    }

    pub fn get(&self, id: i64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: i64) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.len() - self.active_count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
