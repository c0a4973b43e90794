use crate::theme::Appearance;
use ratatui::style::Color;

/// Colours for one of the two visual modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub completed: Color,
    pub danger: Color,
    pub selection_bg: Color,
    pub editing_bg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            foreground: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(59, 130, 246),
            completed: Color::Rgb(107, 114, 128),
            danger: Color::Rgb(248, 113, 113),
            selection_bg: Color::Rgb(55, 65, 81),
            editing_bg: Color::Rgb(113, 63, 18),
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Rgb(55, 65, 81),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(37, 99, 235),
            completed: Color::Rgb(156, 163, 175),
            danger: Color::Rgb(220, 38, 38),
            selection_bg: Color::Rgb(243, 244, 246),
            editing_bg: Color::Rgb(254, 252, 232),
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        if appearance.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
