use super::edit_buffer::EditBuffer;
use super::mode::Mode;
use crate::theme::ThemePolicy;
use crate::todo::{filter, FilterMode, TodoList};
use crate::ui::view::ListView;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Instant;

/// Domain state plus the one piece of view state the projection needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub todos: TodoList,
    pub filter: FilterMode,
    pub theme: ThemePolicy,
    /// Row currently showing the edit input
    pub editing: Option<i64>,
}

impl AppState {
    pub fn new(todos: TodoList, theme: ThemePolicy) -> Self {
        Self {
            todos,
            filter: FilterMode::default(),
            theme,
            editing: None,
        }
    }

    pub fn project(&self) -> ListView {
        let visible = filter::apply(&self.todos, self.filter);
        ListView::project(
            &visible,
            self.todos.active_count(),
            self.filter,
            self.theme.appearance(),
            self.editing,
        )
    }
}

/// Terminal-side interaction state: focus, cursor, input buffers, layout.
#[derive(Debug, Default)]
pub struct UiState {
    pub mode: Mode,
    /// Index of the selected row in the current view
    pub cursor: usize,
    /// Draft for the new-item input
    pub input: EditBuffer,
    /// Buffer of the row being edited
    pub edit: EditBuffer,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
    pub list_state: ListState,
    /// Areas from the last draw, used to map mouse positions
    pub header_area: Rect,
    pub input_area: Rect,
    pub list_area: Rect,
    /// Row id and time of the previous click, for double-click detection
    pub last_click: Option<(i64, Instant)>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clamp_cursor(&mut self, row_count: usize) {
        if row_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= row_count {
            self.cursor = row_count - 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    /// Keeps the ratatui list selection in step with the cursor.
    pub fn sync_list_state(&mut self, row_count: usize) {
        self.clamp_cursor(row_count);
        if row_count == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.cursor));
        }
    }
}
