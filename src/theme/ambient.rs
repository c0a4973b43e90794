//! Ambient (system-level) light/dark preference.
//!
//! The probe answers "what does the system prefer right now"; the watcher polls it
//! on a background thread and forwards only changes to the event loop.

use super::ThemePreference;
use serde::{Deserialize, Serialize};
use std::env;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Where the ambient preference comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientSource {
    /// Ask the desktop, then the terminal.
    #[default]
    Auto,
    /// Pretend the system prefers light.
    Light,
    /// Pretend the system prefers dark.
    Dark,
    /// Never report a preference.
    #[serde(rename = "none")]
    Disabled,
}

pub trait AmbientProbe {
    fn detect(&self) -> Option<ThemePreference>;
}

/// Probe backed by the desktop settings and the `COLORFGBG` terminal convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe {
    source: AmbientSource,
}

impl SystemProbe {
    pub fn new(source: AmbientSource) -> Self {
        Self { source }
    }
}

impl AmbientProbe for SystemProbe {
    fn detect(&self) -> Option<ThemePreference> {
        match self.source {
            AmbientSource::Light => Some(ThemePreference::Light),
            AmbientSource::Dark => Some(ThemePreference::Dark),
            AmbientSource::Disabled => None,
            AmbientSource::Auto => detect_desktop().or_else(detect_terminal),
        }
    }
}

impl<F> AmbientProbe for F
where
    F: Fn() -> Option<ThemePreference>,
{
    fn detect(&self) -> Option<ThemePreference> {
        self()
    }
}

#[cfg(target_os = "macos")]
fn detect_desktop() -> Option<ThemePreference> {
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    // The key is absent (non-zero exit) when the system is in light mode.
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(parse_apple_interface_style(
        output.status.success().then_some(&*stdout),
    ))
}

#[cfg(not(target_os = "macos"))]
fn detect_desktop() -> Option<ThemePreference> {
    let output = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_gsettings_color_scheme(&String::from_utf8_lossy(&output.stdout))
}

fn detect_terminal() -> Option<ThemePreference> {
    let value = env::var("COLORFGBG").ok()?;
    parse_colorfgbg(&value)
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_apple_interface_style(output: Option<&str>) -> ThemePreference {
    match output {
        Some(style) if style.trim().eq_ignore_ascii_case("dark") => ThemePreference::Dark,
        _ => ThemePreference::Light,
    }
}

#[cfg_attr(target_os = "macos", allow(dead_code))]
fn parse_gsettings_color_scheme(output: &str) -> Option<ThemePreference> {
    match output.trim().trim_matches('\'') {
        "prefer-dark" => Some(ThemePreference::Dark),
        "prefer-light" | "default" => Some(ThemePreference::Light),
        _ => None,
    }
}

/// `COLORFGBG` is `fg;bg` (or `fg;default;bg`). ANSI backgrounds 0-6 and 8 are dark.
fn parse_colorfgbg(value: &str) -> Option<ThemePreference> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(ThemePreference::Dark),
        7 | 9..=15 => Some(ThemePreference::Light),
        _ => None,
    }
}

/// Receives ambient preference changes from a polling thread.
pub struct AmbientWatcher {
    rx: mpsc::Receiver<Option<ThemePreference>>,
}

impl AmbientWatcher {
    /// Spawns the polling thread. `initial` is the value already applied at
    /// startup; only values that differ from the last seen one are sent.
    pub fn spawn<P>(probe: P, initial: Option<ThemePreference>, interval: Duration) -> Self
    where
        P: AmbientProbe + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last = initial;
            loop {
                thread::sleep(interval);

                let detected = probe.detect();
                trace!(?detected, "ambient probe");
                if detected == last {
                    continue;
                }
                debug!(from = ?last, to = ?detected, "ambient theme preference changed");
                last = detected;
                if tx.send(detected).is_err() {
                    // Event loop is gone
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Drains pending notifications, returning the most recent one.
    pub fn latest(&self) -> Option<Option<ThemePreference>> {
        let mut latest = None;
        while let Ok(change) = self.rx.try_recv() {
            latest = Some(change);
        }
        latest
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Option<ThemePreference>> {
        self.rx.recv_timeout(timeout).ok()
    }
}
