mod filters;
mod form;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::app::{App, Pane};

/// Submit the intake form. A validation failure is already the form's
/// notice, so it is only logged here.
fn submit_form(app: &mut App) {
    if let Err(e) = app.intake.submit() {
        debug!(error = %e, "submit rejected by validation");
    }
}

/// Handle a key event for the focused pane
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('s') if ctrl => {
            submit_form(app);
            return;
        }
        KeyCode::Tab => {
            app.pane = app.pane.next();
            return;
        }
        KeyCode::BackTab => {
            app.pane = app.pane.prev();
            return;
        }
        _ => {}
    }

    match app.pane {
        Pane::Form => form::handle_form(app, key),
        Pane::Filters => filters::handle_filters(app, key),
        Pane::List => list::handle_list(app, key),
    }
}

/// Handle a bracketed paste. Goes into whichever text field has focus;
/// newlines become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    let clean = text.replace(['\r', '\n'], " ");
    if clean.is_empty() {
        return;
    }
    match app.pane {
        Pane::Form => form::insert_text(app, &clean),
        Pane::Filters => filters::insert_text(app, &clean),
        Pane::List => {}
    }
}

/// Printable character with no Ctrl/Alt held
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn type_str(app: &mut crate::tui::app::App, text: &str) {
        for c in text.chars() {
            super::handle_key(app, key(KeyCode::Char(c)));
        }
    }

    /// Let spawned requests run
    pub async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }
}
