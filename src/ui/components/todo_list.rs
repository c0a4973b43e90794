use crate::app::mode::Mode;
use crate::app::UiState;
use crate::ui::theme::Palette;
use crate::ui::view::{ListView, RowView};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{HighlightSpacing, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// "› " selection marker
const MARKER_WIDTH: usize = 2;
/// "[x] "
const CHECKBOX_WIDTH: usize = 4;
/// Column where the item text starts
pub const TEXT_COLUMN: usize = MARKER_WIDTH + CHECKBOX_WIDTH;
/// " ✗ " delete affordance at the right edge of the selected row
const DELETE_BUTTON: &str = " ✗ ";
const DELETE_WIDTH: usize = 3;

/// Part of a row under the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    Checkbox,
    Text,
    Delete,
}

pub fn render(f: &mut Frame, view: &ListView, ui: &mut UiState, palette: &Palette, area: Rect) {
    ui.sync_list_state(view.rows.len());

    if view.show_empty {
        let message = Paragraph::new(Line::from(Span::styled(
            "No todos here. Press a to add one.",
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        f.render_widget(message, Rect::new(area.x, y, area.width, 1));
        return;
    }

    let width = area.width as usize;
    let edit_text = ui.edit.text();
    let items: Vec<ListItem> = view
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let selected = index == ui.cursor;
            let text = if row.editing { edit_text } else { row.text.as_str() };
            ListItem::new(row_line(row, text, selected, width, palette))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(palette.selection_bg))
        .highlight_spacing(HighlightSpacing::Never);

    f.render_stateful_widget(list, area, &mut ui.list_state);

    if ui.mode == Mode::Edit
        && let Some(index) = view.rows.iter().position(|row| row.editing)
        && index >= ui.list_state.offset()
    {
        let visual_row = (index - ui.list_state.offset()) as u16;
        if visual_row < area.height {
            let x = area.x + (TEXT_COLUMN + ui.edit.cursor_column()) as u16;
            f.set_cursor_position(Position::new(
                x.min(area.right().saturating_sub(1)),
                area.y + visual_row,
            ));
        }
    }
}

fn row_line<'a>(
    row: &RowView,
    text: &'a str,
    selected: bool,
    width: usize,
    palette: &Palette,
) -> Line<'a> {
    let marker = if selected { "› " } else { "  " };
    let checkbox = if row.completed { "[x] " } else { "[ ] " };

    let text_style = if row.editing {
        Style::default().fg(palette.foreground).bg(palette.editing_bg)
    } else if row.completed {
        Style::default()
            .fg(palette.completed)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(palette.foreground)
    };

    let available = width.saturating_sub(TEXT_COLUMN + DELETE_WIDTH);
    let shown = truncate_to_width(text, available);
    let padding = available.saturating_sub(shown.width());

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(checkbox, Style::default().fg(palette.accent)),
        Span::styled(shown, text_style),
        Span::raw(" ".repeat(padding)),
    ];
    if selected && !row.editing {
        spans.push(Span::styled(
            DELETE_BUTTON,
            Style::default().fg(palette.danger).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            return &text[..i];
        }
        used += w;
    }
    text
}

/// Maps a mouse position to a visible row index, honouring the scroll offset.
pub fn row_at(area: Rect, offset: usize, row_count: usize, column: u16, row: u16) -> Option<usize> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let index = offset + (row - area.y) as usize;
    (index < row_count).then_some(index)
}

pub fn zone_at(area: Rect, column: u16) -> RowZone {
    let relative = column.saturating_sub(area.x) as usize;
    if relative < TEXT_COLUMN {
        RowZone::Checkbox
    } else if relative >= (area.width as usize).saturating_sub(DELETE_WIDTH) {
        RowZone::Delete
    } else {
        RowZone::Text
    }
}
