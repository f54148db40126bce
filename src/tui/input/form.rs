use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::intake::FieldValue;
use crate::model::{Category, Priority, cycle_option};
use crate::tui::app::{App, FormField, step};
use crate::util::unicode::{pop_grapheme, pop_word};

use super::{submit_form, typed_char};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.form_field = step(app.form_field, &FormField::ALL, false),
        KeyCode::Down => app.form_field = step(app.form_field, &FormField::ALL, true),
        KeyCode::Esc => {
            if app.intake.draft().is_editing() {
                app.intake.cancel_edit();
                app.form_field = FormField::Title;
            }
        }
        KeyCode::Enter => match app.form_field {
            FormField::Submit => submit_form(app),
            field => app.form_field = step(field, &FormField::ALL, true),
        },
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match app.form_field {
                FormField::Category => {
                    let next = cycle_value(app.intake.draft().category, &Category::ALL, forward);
                    app.intake.on_field_change(FieldValue::Category(next));
                }
                FormField::Priority => {
                    let next = cycle_value(app.intake.draft().priority, &Priority::ALL, forward);
                    app.intake.on_field_change(FieldValue::Priority(next));
                }
                _ => {}
            }
        }
        KeyCode::Backspace => edit_text(app, pop_grapheme),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            edit_text(app, pop_word)
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                insert_text(app, c.encode_utf8(&mut [0; 4]));
            }
        }
    }
}

pub(super) fn insert_text(app: &mut App, text: &str) {
    edit_text(app, |s| s.push_str(text));
}

/// Apply `f` to the focused text field and report the change to the controller
fn edit_text(app: &mut App, f: impl FnOnce(&mut String)) {
    match app.form_field {
        FormField::Title => {
            let mut title = app.intake.draft().title.clone();
            f(&mut title);
            app.intake.on_title_change(title);
        }
        FormField::Description => {
            let mut description = app.intake.draft().description.clone();
            f(&mut description);
            app.intake.on_description_change(description);
        }
        _ => {}
    }
}

/// Like [`cycle_option`] but never lands on "unset"
fn cycle_value<T: Copy + PartialEq>(current: Option<T>, all: &[T], forward: bool) -> T {
    cycle_option(current, all, forward)
        .or_else(|| cycle_option(None, all, forward))
        .unwrap_or(all[0])
}
