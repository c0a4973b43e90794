use crate::theme::ThemePreference;
use crate::todo::FilterMode;

/// Everything that can change the widget's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(i64),
    Delete(i64),
    Edit(i64, String),
    SetFilter(FilterMode),
    ClearCompleted,
    ToggleTheme,
    /// Pins an explicit theme (CLI `theme light|dark`).
    SetTheme(ThemePreference),
    /// System light/dark preference changed; `None` when it can no longer be read.
    AmbientChanged(Option<ThemePreference>),
}
