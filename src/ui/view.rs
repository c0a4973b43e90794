//! The render projection: everything the terminal draws is read from a `ListView`.

use crate::theme::Appearance;
use crate::todo::{FilterMode, TodoItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    /// Row shows the edit input instead of its static text
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub show_empty: bool,
    pub count_label: String,
    pub active_filter: FilterMode,
    pub appearance: Appearance,
}

impl ListView {
    /// Builds a fresh view. `active_count` is taken from the unfiltered list.
    pub fn project(
        visible: &[&TodoItem],
        active_count: usize,
        filter: FilterMode,
        appearance: Appearance,
        editing: Option<i64>,
    ) -> Self {
        let rows = visible
            .iter()
            .map(|item| RowView {
                id: item.id,
                text: item.text.clone(),
                completed: item.completed,
                editing: editing == Some(item.id),
            })
            .collect::<Vec<_>>();

        Self {
            show_empty: rows.is_empty(),
            rows,
            count_label: count_label(active_count),
            active_filter: filter,
            appearance,
        }
    }

    pub fn row_id(&self, index: usize) -> Option<i64> {
        self.rows.get(index).map(|row| row.id)
    }

    /// Exactly one selector is active at a time.
    pub fn is_filter_selected(&self, mode: FilterMode) -> bool {
        self.active_filter == mode
    }
}

pub fn count_label(active_count: usize) -> String {
    format!(
        "{} {} left",
        active_count,
        if active_count == 1 { "item" } else { "items" }
    )
}
