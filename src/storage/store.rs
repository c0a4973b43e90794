use super::backend::KeyValueStore;
use crate::theme::ThemePreference;
use crate::todo::{TodoItem, TodoList};
use anyhow::Result;
use tracing::{debug, warn};

pub const TODOS_KEY: &str = "todos";
pub const THEME_KEY: &str = "theme";

/// Typed access to the two persisted values.
///
/// Loads never fail: absent or malformed data yields the empty default. Saves
/// report success as a `bool` and log the underlying error; nothing is retried.
pub struct Store<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load_todos(&self) -> TodoList {
        match self.try_load_todos() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "stored todos are unreadable, starting empty");
                TodoList::new()
            }
        }
    }

    fn try_load_todos(&self) -> Result<TodoList> {
        let Some(raw) = self.backend.get(TODOS_KEY)? else {
            return Ok(TodoList::new());
        };
        let items: Option<Vec<TodoItem>> = serde_json::from_str(&raw)?;
        let list = TodoList::with_items(items.unwrap_or_default());
        debug!(count = list.len(), "loaded todos");
        Ok(list)
    }

    pub fn save_todos(&mut self, items: &[TodoItem]) -> bool {
        let result = serde_json::to_string(items)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.backend.set(TODOS_KEY, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save todos");
                false
            }
        }
    }

    /// `None` means no preference was ever persisted (or it is unreadable).
    pub fn load_theme(&self) -> Option<ThemePreference> {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!(error = %e, "ignoring stored theme");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read stored theme");
                None
            }
        }
    }

    pub fn save_theme(&mut self, theme: ThemePreference) -> bool {
        match self.backend.set(THEME_KEY, theme.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save theme");
                false
            }
        }
    }
}
