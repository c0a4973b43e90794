pub mod components;
pub mod theme;
pub mod view;

use crate::app::event::{handle_key_event, handle_mouse_event};
use crate::app::{Controller, Intent, UiState};
use crate::storage::KeyValueStore;
use crate::theme::AmbientWatcher;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = disable_raw_mode();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

/// Runs the interactive widget until the user quits.
pub fn run_tui<B: KeyValueStore>(
    controller: &mut Controller<B>,
    ambient: Option<AmbientWatcher>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = UiState::new();
    let result = run_app(&mut terminal, controller, &mut ui, ambient.as_ref());
    terminal.show_cursor()?;

    result
}

fn run_app<B: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<B>,
    ui: &mut UiState,
    ambient: Option<&AmbientWatcher>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            components::render(f, controller.view(), ui);
        })?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, controller, ui)?;
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, controller, ui)?,
                _ => {}
            }
        }

        if let Some(change) = ambient.and_then(AmbientWatcher::latest) {
            debug!(?change, "ambient preference notification");
            controller.dispatch(Intent::AmbientChanged(change));
        }

        if ui.should_quit {
            break;
        }
    }

    Ok(())
}
