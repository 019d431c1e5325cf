use crate::app::AppState;
use crate::timer_item::TimerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key press. Returns `true` when the user asked to quit.
pub fn handle_input(key: KeyEvent, app: &mut AppState) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.form.is_some() {
        handle_form(key, app);
        return false;
    }

    if app.confirm_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.perform(TimerAction::Delete);
                app.confirm_delete = false;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_delete = false,
            _ => {}
        }
        return false;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return false;
    }

    handle_main_view(key, app)
}

fn handle_form(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        _ => {
            let Some(form) = app.form.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.push_char(c),
                _ => {}
            }
        }
    }
}

fn handle_main_view(key: KeyEvent, app: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char(' ') => app.perform(TimerAction::Toggle),
        KeyCode::Char('r') => app.perform(TimerAction::Restart),
        KeyCode::Char('e') | KeyCode::Enter => app.perform(TimerAction::Edit),
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.selected_timer().is_some() {
                app.confirm_delete = true;
            }
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('t') => app.cycle_theme(true),
        KeyCode::Char('T') => app.cycle_theme(false),
        KeyCode::Char('h') | KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    false
}
