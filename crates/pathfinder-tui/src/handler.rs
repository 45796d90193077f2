use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use pathfinder_core::Route;

use crate::app::{App, InputMode, InputTarget};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
        AppEvent::Session(event) => app.on_session_event(event),
        AppEvent::Reply(reply) => app.deliver_reply(reply),
    }
    Ok(())
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(3),
        MouseEventKind::ScrollUp => app.scroll_up(3),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.left(),
        KeyCode::Right => app.input.right(),
        KeyCode::Home => app.input.home(),
        KeyCode::End => app.input.end(),
        KeyCode::Char(c) => app.input.insert(c),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // An open picker swallows everything
    if app.picker.is_some() {
        handle_picker(app, key);
        return;
    }

    if app.show_assistant {
        match key.code {
            KeyCode::Esc => {
                app.toggle_assistant();
                return;
            }
            KeyCode::Char('i') => {
                app.begin_editing(InputTarget::AssistantChat, "");
                return;
            }
            _ => {}
        }
    }

    if handle_global(app, key) {
        return;
    }

    if app.form_visible() {
        handle_form(app, key);
        return;
    }

    match app.route() {
        Route::Landing | Route::UseCase | Route::Subscription => handle_static(app, key),
        Route::Login | Route::Signup => {
            if key.code == KeyCode::Enter {
                app.go(Route::ProfileSetup);
            }
        }
        Route::Dashboard => handle_dashboard(app, key),
        Route::Roadmap => handle_roadmap(app, key),
        Route::Profile => {
            if key.code == KeyCode::Char('e') {
                app.toggle_profile_editor();
            }
        }
        Route::NotFound => {
            if key.code == KeyCode::Enter {
                app.go(Route::Landing);
            }
        }
        // Covered by form_visible
        Route::ProfileSetup => {}
    }
}

/// Keys available on every view. Returns true when the key was used.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_nav(index);
        }
        KeyCode::Char(':') => {
            let current = app.router.current().path.clone();
            app.begin_editing(InputTarget::GoTo, &current);
        }
        KeyCode::Char('b') => app.back(),
        KeyCode::Char('a') => app.toggle_assistant(),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::Esc if app.show_profile_editor => app.toggle_profile_editor(),
        _ => return false,
    }
    true
}

fn handle_static(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('g') => app.content_scroll = 0,
        // Every call to action on these pages leads to sign up
        KeyCode::Enter => app.go(Route::Signup),
        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.form_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.form_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_form_row(),
        KeyCode::Char('d') => app.clear_form_row(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit_form(),
        _ => {}
    }
}

fn handle_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.picker_next(),
        KeyCode::Char('k') | KeyCode::Up => app.picker_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.picker_choose(),
        KeyCode::Esc | KeyCode::Char('q') => app.close_picker(),
        _ => {}
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.dashboard_next(),
        KeyCode::Char('k') | KeyCode::Up => app.dashboard_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_item(),
        KeyCode::Char('r') => app.go(Route::Roadmap),
        KeyCode::Char('e') => app.toggle_profile_editor(),
        _ => {}
    }
}

fn handle_roadmap(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.begin_editing(InputTarget::RoadmapChat, ""),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        _ => {}
    }
}
