pub mod header;
pub mod status_bar;
pub mod todo_list;

use crate::app::mode::Mode;
use crate::app::UiState;
use crate::ui::theme::Palette;
use crate::ui::view::ListView;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INPUT_PROMPT: &str = " › ";
const INPUT_PLACEHOLDER: &str = "What needs to be done?";

/// Draws the whole screen from `view`. Records the layout in `ui` for mouse mapping.
pub fn render(f: &mut Frame, view: &ListView, ui: &mut UiState) {
    let palette = Palette::for_appearance(view.appearance);
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header: title, filters, theme icon
            Constraint::Length(1), // New item input
            Constraint::Length(1), // Rule
            Constraint::Min(1),    // Todo list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ui.header_area = chunks[0];
    ui.input_area = chunks[1];
    ui.list_area = chunks[3];

    header::render(f, view, &palette, chunks[0]);
    render_input(f, ui, &palette, chunks[1]);
    f.render_widget(
        Paragraph::new("─".repeat(chunks[2].width as usize))
            .style(Style::default().fg(palette.muted)),
        chunks[2],
    );
    todo_list::render(f, view, ui, &palette, chunks[3]);
    status_bar::render(f, view, ui, &palette, chunks[4]);

    if ui.show_help {
        render_help_overlay(f, &palette);
    }
}

fn render_input(f: &mut Frame, ui: &UiState, palette: &Palette, area: Rect) {
    let focused = ui.mode == Mode::Insert;
    let prompt_style = if focused {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let content = if ui.input.text().is_empty() && !focused {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(palette.muted))
    } else {
        Span::styled(ui.input.text().to_string(), Style::default().fg(palette.foreground))
    };

    let line = Line::from(vec![Span::styled(INPUT_PROMPT, prompt_style), content]);
    f.render_widget(Paragraph::new(line), area);

    if focused {
        let prompt_width = INPUT_PROMPT.chars().count() as u16;
        let x = area.x + prompt_width + ui.input.cursor_column() as u16;
        f.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
    }
}

fn render_help_overlay(f: &mut Frame, palette: &Palette) {
    let key_style = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(palette.foreground);
    let section_style = Style::default().fg(palette.muted).add_modifier(Modifier::BOLD);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {key:<16}"), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("  ── Items ──", section_style)),
        entry("a / n", "New item (Enter adds, Esc leaves input)"),
        entry("Space / x", "Toggle completed"),
        entry("e / Enter", "Edit item (Enter or Esc commits)"),
        entry("d / Del", "Delete item"),
        entry("c", "Clear completed"),
        Line::from(""),
        Line::from(Span::styled("  ── View ──", section_style)),
        entry("j / k / ↑ / ↓", "Move selection"),
        entry("1 / 2 / 3", "Show all / active / completed"),
        entry("f / Tab", "Next filter"),
        entry("t", "Toggle light/dark theme"),
        Line::from(""),
        entry("? / Esc", "Close help"),
        entry("q", "Quit"),
    ];

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let popup = centered_rect(60, height, f.area());

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .style(Style::default().bg(palette.background)),
        ),
        popup,
    );
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + r.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
