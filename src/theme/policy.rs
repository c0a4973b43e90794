use super::ThemePreference;
use tracing::debug;

/// Theme used when neither a persisted nor an ambient preference is known.
pub const FALLBACK_THEME: ThemePreference = ThemePreference::Dark;

/// Which of the two mutually exclusive header icons is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    /// Shown in dark mode; selecting it switches to light.
    Sun,
    /// Shown in light mode; selecting it switches to dark.
    Moon,
}

impl ThemeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            ThemeIcon::Sun => "☀",
            ThemeIcon::Moon => "☾",
        }
    }
}

/// The two view-level writes a theme implies. Always derived together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub dark_mode: bool,
    pub icon: ThemeIcon,
}

impl Appearance {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Dark => Self {
                dark_mode: true,
                icon: ThemeIcon::Sun,
            },
            ThemePreference::Light => Self {
                dark_mode: false,
                icon: ThemeIcon::Moon,
            },
        }
    }
}

/// Resolves the effective theme from a persisted choice and the ambient system
/// preference. Once a choice is persisted, ambient changes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePolicy {
    current: ThemePreference,
    persisted: bool,
}

impl ThemePolicy {
    pub fn resolve(
        persisted: Option<ThemePreference>,
        ambient: Option<ThemePreference>,
    ) -> Self {
        match persisted {
            Some(theme) => Self {
                current: theme,
                persisted: true,
            },
            None => Self {
                current: ambient.unwrap_or(FALLBACK_THEME),
                persisted: false,
            },
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn appearance(&self) -> Appearance {
        Appearance::for_theme(self.current)
    }

    /// Flips the theme and pins it. The caller persists the returned value.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        self.persisted = true;
        self.current
    }

    /// Pins an explicit theme, as `toggle` would.
    pub fn set(&mut self, theme: ThemePreference) {
        self.current = theme;
        self.persisted = true;
    }

    /// Applies an ambient change. Returns whether the resolved theme changed.
    pub fn ambient_changed(&mut self, ambient: Option<ThemePreference>) -> bool {
        if self.persisted {
            debug!(?ambient, "ambient theme change ignored, preference is persisted");
            return false;
        }
        let next = ambient.unwrap_or(FALLBACK_THEME);
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }
}

impl Default for ThemePolicy {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
