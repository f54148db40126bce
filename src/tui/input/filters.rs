use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Category, Priority, Status, cycle_option};
use crate::tui::app::{App, FilterField, step};
use crate::util::unicode::pop_grapheme;

use super::typed_char;

pub(super) fn handle_filters(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.filter_field = step(app.filter_field, &FilterField::ALL, false),
        KeyCode::Down => app.filter_field = step(app.filter_field, &FilterField::ALL, true),
        KeyCode::Delete => {
            app.search_input.clear();
            if app.collection.clear_filters() {
                app.list_cursor = 0;
            }
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            let mut filters = app.collection.filters().clone();
            match app.filter_field {
                FilterField::Category => {
                    filters.category = cycle_option(filters.category, &Category::ALL, forward)
                }
                FilterField::Priority => {
                    filters.priority = cycle_option(filters.priority, &Priority::ALL, forward)
                }
                FilterField::Status => {
                    filters.status = cycle_option(filters.status, &Status::ALL, forward)
                }
                FilterField::Search => return,
            }
            apply(app, filters);
        }
        KeyCode::Enter if app.filter_field == FilterField::Search => {
            let mut filters = app.collection.filters().clone();
            filters.set_search(&app.search_input);
            apply(app, filters);
        }
        KeyCode::Esc if app.filter_field == FilterField::Search => {
            app.search_input = app.collection.filters().search.clone().unwrap_or_default();
        }
        KeyCode::Backspace if app.filter_field == FilterField::Search => {
            pop_grapheme(&mut app.search_input);
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                insert_text(app, c.encode_utf8(&mut [0; 4]));
            }
        }
    }
}

/// Typing anywhere in the filter bar goes to the search box
pub(super) fn insert_text(app: &mut App, text: &str) {
    app.filter_field = FilterField::Search;
    app.search_input.push_str(text);
}

fn apply(app: &mut App, filters: crate::model::FilterCriteria) {
    if app.collection.set_filters(filters) {
        app.list_cursor = 0;
        app.list_scroll = 0;
    }
}
