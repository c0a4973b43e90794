use crate::todo::FilterMode;
use crate::ui::theme::Palette;
use crate::ui::view::ListView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = " todos ";
const SEPARATOR: &str = " ";
/// Columns reserved at the right edge for the theme icon
pub const THEME_BUTTON_WIDTH: u16 = 4;

/// Clickable controls in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Filter(FilterMode),
    ThemeToggle,
}

fn filter_label(mode: FilterMode) -> String {
    format!("[{}] {}", filter_key(mode), mode.label())
}

fn filter_key(mode: FilterMode) -> char {
    match mode {
        FilterMode::All => '1',
        FilterMode::Active => '2',
        FilterMode::Completed => '3',
    }
}

/// Header text split into segments, each optionally bound to a control.
fn segments() -> Vec<(Option<HeaderTarget>, String)> {
    let mut segments = vec![(None, TITLE.to_string())];
    for mode in FilterMode::ALL {
        segments.push((None, SEPARATOR.to_string()));
        segments.push((Some(HeaderTarget::Filter(mode)), filter_label(mode)));
    }
    segments
}

pub fn render(f: &mut Frame, view: &ListView, palette: &Palette, area: Rect) {
    let title_style = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let mut spans: Vec<Span> = Vec::new();
    let mut used = 0usize;

    for (target, text) in segments() {
        used += text.width();
        let style = match target {
            Some(HeaderTarget::Filter(mode)) if view.is_filter_selected(mode) => Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
            Some(_) => Style::default().fg(palette.foreground),
            None if text == TITLE => title_style,
            None => Style::default(),
        };
        spans.push(Span::styled(text, style));
    }

    let icon = format!(" {} ", view.appearance.icon.glyph());
    let padding = (area.width as usize).saturating_sub(used + icon.width());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        icon,
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Resolves a click in the header to the control under it.
pub fn hit_test(area: Rect, column: u16) -> Option<HeaderTarget> {
    if column < area.x || column >= area.right() {
        return None;
    }
    if column >= area.right().saturating_sub(THEME_BUTTON_WIDTH) {
        return Some(HeaderTarget::ThemeToggle);
    }

    let offset = (column - area.x) as usize;
    let mut start = 0usize;
    for (target, text) in segments() {
        let end = start + text.width();
        if offset < end {
            return target;
        }
        start = end;
    }
    None
}
