use super::intent::Intent;
use super::state::AppState;
use crate::storage::{KeyValueStore, Store};
use crate::theme::{ThemePolicy, ThemePreference};
use crate::todo::item::normalize_text;
use crate::ui::view::ListView;
use tracing::{debug, info};

pub const SAVE_FAILED_NOTICE: &str = "Could not save changes; continuing in memory";

/// What an applied intent still needs after the in-memory mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    SaveTodos,
    SaveTheme,
    RenderOnly,
}

/// Owns the widget state and the store. Every applied intent runs
/// mutate -> persist -> render; a rejected intent does none of them.
pub struct Controller<B: KeyValueStore> {
    state: AppState,
    store: Store<B>,
    view: ListView,
    render_count: u64,
    notice: Option<String>,
}

impl<B: KeyValueStore> Controller<B> {
    /// Loads persisted state and renders the initial view.
    pub fn new(store: Store<B>, ambient: Option<ThemePreference>) -> Self {
        let todos = store.load_todos();
        let theme = ThemePolicy::resolve(store.load_theme(), ambient);
        info!(
            items = todos.len(),
            theme = %theme.current(),
            theme_persisted = theme.is_persisted(),
            "state loaded"
        );

        let state = AppState::new(todos, theme);
        let view = state.project();
        Self {
            state,
            store,
            view,
            render_count: 1,
            notice: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Message for the user produced by the last failed save, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Returns whether the intent was applied.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        debug!(?intent, "dispatch");
        let Some(effect) = self.apply(intent) else {
            debug!("intent rejected");
            return false;
        };

        let saved = match effect {
            Effect::SaveTodos => self.store.save_todos(&self.state.todos.items),
            Effect::SaveTheme => self.store.save_theme(self.state.theme.current()),
            Effect::RenderOnly => true,
        };
        if !saved {
            self.notice = Some(SAVE_FAILED_NOTICE.to_string());
        }

        self.render();
        true
    }

    fn apply(&mut self, intent: Intent) -> Option<Effect> {
        let state = &mut self.state;
        match intent {
            Intent::Add(text) => state.todos.add(&text).map(|_| Effect::SaveTodos),
            Intent::Toggle(id) => state.todos.toggle(id).then_some(Effect::SaveTodos),
            Intent::Delete(id) => {
                if !state.todos.delete(id) {
                    return None;
                }
                if state.editing == Some(id) {
                    state.editing = None;
                }
                Some(Effect::SaveTodos)
            }
            Intent::Edit(id, text) => state.todos.edit(id, &text).then_some(Effect::SaveTodos),
            Intent::SetFilter(mode) => {
                state.filter = mode;
                Some(Effect::RenderOnly)
            }
            Intent::ClearCompleted => {
                (state.todos.clear_completed() > 0).then_some(Effect::SaveTodos)
            }
            Intent::ToggleTheme => {
                let theme = state.theme.toggle();
                info!(%theme, "theme toggled");
                Some(Effect::SaveTheme)
            }
            Intent::SetTheme(theme) => {
                state.theme.set(theme);
                info!(%theme, "theme set");
                Some(Effect::SaveTheme)
            }
            Intent::AmbientChanged(ambient) => {
                if !state.theme.ambient_changed(ambient) {
                    return None;
                }
                info!(theme = %state.theme.current(), "theme follows system preference");
                Some(Effect::RenderOnly)
            }
        }
    }

    /// Switches a row into edit mode. No persistence is involved.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        if self.state.todos.get(id).is_none() {
            return false;
        }
        self.state.editing = Some(id);
        self.render();
        true
    }

    /// Leaves edit mode and applies `text` to the edited row. Blank text keeps
    /// the old text. Returns whether the item changed.
    pub fn commit_edit(&mut self, text: &str) -> bool {
        let Some(id) = self.state.editing.take() else {
            return false;
        };
        let applied = normalize_text(text).is_some() && self.dispatch(Intent::Edit(id, text.to_string()));
        if !applied {
            self.render();
        }
        applied
    }

    /// Rebuilds the view from state. The only producer of `ListView`.
    fn render(&mut self) {
        self.view = self.state.project();
        self.render_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, THEME_KEY};
    use crate::todo::FilterMode;
    use anyhow::{anyhow, Result};
    use pretty_assertions::assert_eq;

    fn controller() -> Controller<MemoryStore> {
        Controller::new(Store::new(MemoryStore::new()), None)
    }

    fn visible<B: KeyValueStore>(controller: &Controller<B>) -> Vec<String> {
        controller.view().rows.iter().map(|row| row.text.clone()).collect()
    }

    /// Reads succeed; writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn test_add_persists_and_renders() {
        let mut c = controller();
        let renders = c.render_count();

        assert!(c.dispatch(Intent::Add("  Buy milk ".into())));

        assert_eq!(visible(&c), vec!["Buy milk"]);
        assert_eq!(c.render_count(), renders + 1);
        assert_eq!(c.store().load_todos(), c.state().todos);
    }

    #[test]
    fn test_rejected_intents_do_nothing() {
        let mut c = controller();
        let renders = c.render_count();

        assert!(!c.dispatch(Intent::Add("   ".into())));
        assert!(!c.dispatch(Intent::Toggle(99)));
        assert!(!c.dispatch(Intent::Delete(99)));
        assert!(!c.dispatch(Intent::Edit(99, "x".into())));
        assert!(!c.dispatch(Intent::ClearCompleted));

        assert_eq!(c.render_count(), renders);
        assert_eq!(c.store().backend().get("todos").unwrap(), None);
    }

    #[test]
    fn test_scenario_filtering() {
        let mut c = controller();
        c.dispatch(Intent::Add("Buy milk".into()));
        c.dispatch(Intent::Add("Walk dog".into()));
        assert_eq!(visible(&c), vec!["Walk dog", "Buy milk"]);

        let milk = c.view().row_id(1).unwrap();
        c.dispatch(Intent::Toggle(milk));
        assert_eq!(c.state().todos.active_count(), 1);
        assert_eq!(c.view().count_label, "1 item left");

        c.dispatch(Intent::SetFilter(FilterMode::Active));
        assert_eq!(visible(&c), vec!["Walk dog"]);
        assert!(c.view().is_filter_selected(FilterMode::Active));

        c.dispatch(Intent::SetFilter(FilterMode::Completed));
        assert_eq!(visible(&c), vec!["Buy milk"]);
        assert_eq!(c.view().count_label, "1 item left");
    }

    #[test]
    fn test_set_filter_does_not_persist() {
        let mut c = controller();
        assert!(c.dispatch(Intent::SetFilter(FilterMode::Completed)));
        assert_eq!(c.store().backend().get("todos").unwrap(), None);
        assert!(c.view().show_empty);
    }

    #[test]
    fn test_clear_completed() {
        let mut c = controller();
        c.dispatch(Intent::Add("A".into()));
        c.dispatch(Intent::Add("B".into()));
        let b = c.view().row_id(0).unwrap();
        c.dispatch(Intent::Toggle(b));

        assert!(c.dispatch(Intent::ClearCompleted));
        assert_eq!(visible(&c), vec!["A"]);
        assert_eq!(c.store().load_todos().len(), 1);
    }

    #[test]
    fn test_toggle_theme_persists_and_pins() {
        let mut c = Controller::new(
            Store::new(MemoryStore::new()),
            Some(ThemePreference::Light),
        );
        assert_eq!(c.state().theme.current(), ThemePreference::Light);
        assert!(!c.view().appearance.dark_mode);

        assert!(c.dispatch(Intent::ToggleTheme));
        assert_eq!(c.store().load_theme(), Some(ThemePreference::Dark));
        assert!(c.view().appearance.dark_mode);

        assert!(!c.dispatch(Intent::AmbientChanged(Some(ThemePreference::Light))));
        assert_eq!(c.state().theme.current(), ThemePreference::Dark);
    }

    #[test]
    fn test_ambient_change_followed_while_unset() {
        let mut c = controller();
        assert_eq!(c.state().theme.current(), ThemePreference::Dark);

        assert!(c.dispatch(Intent::AmbientChanged(Some(ThemePreference::Light))));
        assert!(!c.view().appearance.dark_mode);
        assert_eq!(c.store().backend().get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_persisted_theme_beats_ambient_on_load() {
        let store = Store::new(MemoryStore::new().with_value(THEME_KEY, "light"));
        let mut c = Controller::new(store, Some(ThemePreference::Dark));
        assert_eq!(c.state().theme.current(), ThemePreference::Light);

        assert!(!c.dispatch(Intent::AmbientChanged(Some(ThemePreference::Dark))));
        assert_eq!(c.state().theme.current(), ThemePreference::Light);
    }

    #[test]
    fn test_edit_mode_lifecycle() {
        let mut c = controller();
        c.dispatch(Intent::Add("Buy milk".into()));
        let id = c.view().row_id(0).unwrap();

        assert!(c.begin_edit(id));
        assert!(c.view().rows[0].editing);

        assert!(c.commit_edit("Buy oat milk"));
        assert!(!c.view().rows[0].editing);
        assert_eq!(c.view().rows[0].text, "Buy oat milk");
        assert_eq!(c.store().load_todos().items[0].text, "Buy oat milk");
    }

    #[test]
    fn test_blank_edit_commit_keeps_text() {
        let mut c = controller();
        c.dispatch(Intent::Add("Buy milk".into()));
        let id = c.view().row_id(0).unwrap();

        c.begin_edit(id);
        assert!(!c.commit_edit("   "));
        assert!(!c.view().rows[0].editing);
        assert_eq!(c.view().rows[0].text, "Buy milk");
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let mut c = controller();
        assert!(!c.begin_edit(5));
        assert!(!c.commit_edit("anything"));
    }

    #[test]
    fn test_delete_clears_edit_state() {
        let mut c = controller();
        c.dispatch(Intent::Add("Buy milk".into()));
        let id = c.view().row_id(0).unwrap();
        c.begin_edit(id);

        assert!(c.dispatch(Intent::Delete(id)));
        assert_eq!(c.state().editing, None);
        assert!(c.view().show_empty);
    }

    #[test]
    fn test_failed_save_keeps_memory_state_and_notifies() {
        let mut c = Controller::new(Store::new(ReadOnlyStore::default()), None);

        assert!(c.dispatch(Intent::Add("Buy milk".into())));
        assert_eq!(c.state().todos.len(), 1);
        assert_eq!(visible(&c), vec!["Buy milk"]);
        assert_eq!(c.take_notice().as_deref(), Some(SAVE_FAILED_NOTICE));
        assert_eq!(c.take_notice(), None);
    }

    #[test]
    fn test_loads_existing_state() {
        let mut seed = Controller::new(Store::new(MemoryStore::new()), None);
        seed.dispatch(Intent::Add("Buy milk".into()));
        let backend = seed.store().backend().clone();

        let c = Controller::new(Store::new(backend), None);
        assert_eq!(visible(&c), vec!["Buy milk"]);
        assert_eq!(c.state().filter, FilterMode::All);
    }

    #[test]
    fn test_repeated_filter_selection_is_stable() {
        let mut c = controller();
        c.dispatch(Intent::Add("A".into()));
        c.dispatch(Intent::SetFilter(FilterMode::Active));
        let first = c.view().clone();

        c.dispatch(Intent::SetFilter(FilterMode::Active));
        assert_eq!(c.view(), &first);
    }

    #[test]
    fn test_session_restart_on_disk() {
        use crate::storage::SqliteStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let mut c = Controller::new(Store::new(SqliteStore::open(&path).unwrap()), None);
            c.dispatch(Intent::Add("Buy milk".into()));
            c.dispatch(Intent::Add("Walk dog".into()));
            let dog = c.view().row_id(0).unwrap();
            c.dispatch(Intent::Toggle(dog));
            c.dispatch(Intent::SetTheme(ThemePreference::Light));
            c.dispatch(Intent::SetFilter(FilterMode::Completed));
        }

        let c = Controller::new(
            Store::new(SqliteStore::open(&path).unwrap()),
            Some(ThemePreference::Dark),
        );
        let rows: Vec<_> = c
            .view()
            .rows
            .iter()
            .map(|row| (row.text.as_str(), row.completed))
            .collect();
        assert_eq!(rows, vec![("Walk dog", true), ("Buy milk", false)]);
        assert_eq!(c.state().filter, FilterMode::All);
        assert_eq!(c.state().theme.current(), ThemePreference::Light);
    }

    #[test]
    fn test_add_after_stored_max_id() {
        let raw = r#"[{"id":9223372036854775807,"text":"Far future","completed":false,"createdAt":"2025-01-02T03:04:05Z"}]"#;
        let store = Store::new(MemoryStore::new().with_value("todos", raw));
        let mut c = Controller::new(store, None);

        assert!(c.dispatch(Intent::Add("Buy milk".into())));
        assert_eq!(visible(&c), vec!["Buy milk", "Far future"]);
        assert_eq!(c.view().row_id(0), Some(0));
        assert_eq!(c.store().load_todos().len(), 2);
    }
}
