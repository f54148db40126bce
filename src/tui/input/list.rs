use crossterm::event::{KeyCode, KeyEvent};

use crate::model::TicketPatch;
use crate::tui::app::{App, FormField, Pane};

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    let len = app.collection.tickets().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.list_cursor + 1 < len {
                app.list_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.list_cursor = app.list_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.list_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.list_cursor = len.saturating_sub(1),
        KeyCode::Enter => {
            if let Some(id) = app.selected_ticket().map(|t| t.id.clone()) {
                app.expanded = if app.expanded.as_ref() == Some(&id) { None } else { Some(id) };
            }
        }
        KeyCode::Char('s') => {
            if let Some(ticket) = app.selected_ticket() {
                if app.collection.is_updating(&ticket.id) {
                    return;
                }
                let id = ticket.id.clone();
                let next = ticket.status.next();
                app.collection.update(id, TicketPatch::status(next));
            }
        }
        KeyCode::Char('e') => {
            if let Some(ticket) = app.selected_ticket().cloned() {
                app.intake.begin_edit(&ticket);
                app.pane = Pane::Form;
                app.form_field = FormField::Title;
            }
        }
        KeyCode::Char('r') => app.collection.refresh(),
        _ => {}
    }
}
