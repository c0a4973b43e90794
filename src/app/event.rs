use super::controller::Controller;
use super::intent::Intent;
use super::mode::Mode;
use super::state::UiState;
use crate::storage::KeyValueStore;
use crate::todo::FilterMode;
use crate::ui::components::header::{self, HeaderTarget};
use crate::ui::components::todo_list::{self, RowZone};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

pub fn handle_key_event<B: KeyValueStore>(
    key: KeyEvent,
    controller: &mut Controller<B>,
    ui: &mut UiState,
) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        if ui.mode == Mode::Edit {
            commit_edit(controller, ui);
        }
        ui.should_quit = true;
        return Ok(());
    }

    if ui.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            ui.show_help = false;
        }
        return Ok(());
    }

    match ui.mode {
        Mode::Navigate => handle_navigate_mode(key, controller, ui),
        Mode::Insert => handle_insert_mode(key, controller, ui),
        Mode::Edit => handle_edit_mode(key, controller, ui),
    }

    after_event(controller, ui);
    Ok(())
}

fn handle_navigate_mode<B: KeyValueStore>(
    key: KeyEvent,
    controller: &mut Controller<B>,
    ui: &mut UiState,
) {
    let row_count = controller.view().rows.len();
    let selected = controller.view().row_id(ui.cursor);

    match key.code {
        KeyCode::Char('q') => ui.should_quit = true,
        KeyCode::Char('?') => ui.show_help = true,
        KeyCode::Down | KeyCode::Char('j') => ui.move_cursor_down(row_count),
        KeyCode::Up | KeyCode::Char('k') => ui.move_cursor_up(),
        KeyCode::Home | KeyCode::Char('g') => ui.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => ui.cursor = row_count.saturating_sub(1),
        KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') => ui.mode = Mode::Insert,
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(id) = selected {
                begin_edit(controller, ui, id);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = selected {
                controller.dispatch(Intent::Toggle(id));
            }
        }
        KeyCode::Delete | KeyCode::Char('d') => {
            if let Some(id) = selected {
                controller.dispatch(Intent::Delete(id));
            }
        }
        KeyCode::Char('1') => set_filter(controller, ui, FilterMode::All),
        KeyCode::Char('2') => set_filter(controller, ui, FilterMode::Active),
        KeyCode::Char('3') => set_filter(controller, ui, FilterMode::Completed),
        KeyCode::Tab | KeyCode::Char('f') => {
            let next = controller.state().filter.next();
            set_filter(controller, ui, next);
        }
        KeyCode::Char('c') => {
            controller.dispatch(Intent::ClearCompleted);
        }
        KeyCode::Char('t') => {
            controller.dispatch(Intent::ToggleTheme);
        }
        _ => {}
    }
}

fn handle_insert_mode<B: KeyValueStore>(
    key: KeyEvent,
    controller: &mut Controller<B>,
    ui: &mut UiState,
) {
    match key.code {
        KeyCode::Enter => {
            if controller.dispatch(Intent::Add(ui.input.text().to_string())) {
                ui.input.clear();
                ui.cursor = 0;
            }
        }
        KeyCode::Esc => ui.mode = Mode::Navigate,
        _ => edit_keys(key, &mut ui.input),
    }
}

fn handle_edit_mode<B: KeyValueStore>(
    key: KeyEvent,
    controller: &mut Controller<B>,
    ui: &mut UiState,
) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => commit_edit(controller, ui),
        _ => edit_keys(key, &mut ui.edit),
    }
}

fn edit_keys(key: KeyEvent, buffer: &mut super::EditBuffer) {
    let word = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Left if word => buffer.move_word_left(),
        KeyCode::Right if word => buffer.move_word_right(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.insert(c),
        _ => {}
    }
}

fn set_filter<B: KeyValueStore>(controller: &mut Controller<B>, ui: &mut UiState, mode: FilterMode) {
    controller.dispatch(Intent::SetFilter(mode));
    ui.cursor = 0;
}

fn begin_edit<B: KeyValueStore>(controller: &mut Controller<B>, ui: &mut UiState, id: i64) {
    let Some(text) = controller.state().todos.get(id).map(|item| item.text.clone()) else {
        return;
    };
    if controller.begin_edit(id) {
        ui.edit = super::EditBuffer::from_text(&text);
        ui.mode = Mode::Edit;
    }
}

/// Leaves edit mode. Blank text is dropped here and again by the list itself.
fn commit_edit<B: KeyValueStore>(controller: &mut Controller<B>, ui: &mut UiState) {
    let text = ui.edit.take();
    controller.commit_edit(text.trim());
    ui.mode = Mode::Navigate;
}

/// Single handler for every click: the target row or control is resolved from
/// the position, then dispatched.
pub fn handle_mouse_event<B: KeyValueStore>(
    mouse: MouseEvent,
    controller: &mut Controller<B>,
    ui: &mut UiState,
) -> Result<()> {
    if ui.show_help {
        if let MouseEventKind::Down(_) = mouse.kind {
            ui.show_help = false;
        }
        return Ok(());
    }

    let row_count = controller.view().rows.len();
    match mouse.kind {
        MouseEventKind::ScrollUp => ui.move_cursor_up(),
        MouseEventKind::ScrollDown => ui.move_cursor_down(row_count),
        MouseEventKind::Down(MouseButton::Left) => handle_click(mouse, controller, ui),
        _ => return Ok(()),
    }

    after_event(controller, ui);
    Ok(())
}

fn handle_click<B: KeyValueStore>(mouse: MouseEvent, controller: &mut Controller<B>, ui: &mut UiState) {
    let (column, row) = (mouse.column, mouse.row);

    if row == ui.header_area.y && ui.header_area.height > 0 {
        blur_edit(controller, ui);
        match header::hit_test(ui.header_area, column) {
            Some(HeaderTarget::Filter(mode)) => set_filter(controller, ui, mode),
            Some(HeaderTarget::ThemeToggle) => {
                controller.dispatch(Intent::ToggleTheme);
            }
            None => {}
        }
        return;
    }

    if row == ui.input_area.y && ui.input_area.height > 0 {
        blur_edit(controller, ui);
        ui.mode = Mode::Insert;
        return;
    }

    let row_count = controller.view().rows.len();
    let Some(index) = todo_list::row_at(ui.list_area, ui.list_state.offset(), row_count, column, row)
    else {
        return;
    };
    let Some(id) = controller.view().row_id(index) else {
        return;
    };

    if controller.state().editing == Some(id) {
        return;
    }
    blur_edit(controller, ui);
    if ui.mode == Mode::Insert {
        ui.mode = Mode::Navigate;
    }

    let was_selected = ui.cursor == index;
    ui.cursor = index;

    match todo_list::zone_at(ui.list_area, column) {
        RowZone::Checkbox => {
            controller.dispatch(Intent::Toggle(id));
            ui.last_click = None;
        }
        RowZone::Delete if was_selected => {
            controller.dispatch(Intent::Delete(id));
            ui.last_click = None;
        }
        RowZone::Delete | RowZone::Text => {
            let now = Instant::now();
            let is_double = matches!(
                ui.last_click,
                Some((last_id, at)) if last_id == id && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
            );
            if is_double {
                ui.last_click = None;
                begin_edit(controller, ui, id);
            } else {
                ui.last_click = Some((id, now));
            }
        }
    }
}

/// Focus leaving an edited row commits it.
fn blur_edit<B: KeyValueStore>(controller: &mut Controller<B>, ui: &mut UiState) {
    if ui.mode == Mode::Edit {
        commit_edit(controller, ui);
    }
}

fn after_event<B: KeyValueStore>(controller: &mut Controller<B>, ui: &mut UiState) {
    if let Some(notice) = controller.take_notice() {
        ui.set_status_message(notice);
    }
    ui.sync_list_state(controller.view().rows.len());
}
