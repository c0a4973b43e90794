use crate::app::mode::Mode;
use crate::app::UiState;
use crate::ui::theme::Palette;
use crate::ui::view::ListView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Seconds a status message stays visible
const STATUS_MESSAGE_SECS: u64 = 3;

pub fn render(f: &mut Frame, view: &ListView, ui: &UiState, palette: &Palette, area: Rect) {
    if let Some((message, time)) = &ui.status_message
        && time.elapsed().as_secs() <= STATUS_MESSAGE_SECS
    {
        render_status_message(f, message, area);
        return;
    }

    let hints = match ui.mode {
        Mode::Navigate => "a add  x toggle  e edit  d delete  c clear completed  ? help",
        Mode::Insert => "Enter add  Esc done",
        Mode::Edit => "Enter/Esc save",
    };

    let left = format!(" {} | {} ", view.count_label, ui.mode);
    let padding = (area.width as usize).saturating_sub(left.chars().count() + hints.len() + 1);
    let status_line = format!("{left}{:padding$}{hints} ", "", padding = padding);

    let style = Style::default()
        .fg(palette.status_bar_fg)
        .bg(palette.status_bar_bg);
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status_line, style)])),
        area,
    );
}

fn render_status_message(f: &mut Frame, message: &str, area: Rect) {
    let display_message = format!(" {message} ");

    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(180, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = (area.width as usize).saturating_sub(display_message.chars().count());
    let status_line = format!("{display_message}{:padding$}", "", padding = padding);

    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status_line, style)])),
        area,
    );
}
