use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, FilterField, Pane};
use crate::util::unicode::tail_to_width;

use super::pane_block;

const SEARCH_WIDTH: usize = 20;

pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.collection.filters().active_count();
    let title = if active > 0 {
        format!(" Filters ({}) ", active)
    } else {
        " Filters ".to_string()
    };
    let block = pane_block(app, Some(Pane::Filters), title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filters = app.collection.filters();
    let mut spans = Vec::new();
    push_slot(
        app,
        &mut spans,
        FilterField::Category,
        "Category",
        filters.category.map(|c| c.label()),
    );
    push_slot(
        app,
        &mut spans,
        FilterField::Priority,
        "Priority",
        filters.priority.map(|p| p.label()),
    );
    push_slot(
        app,
        &mut spans,
        FilterField::Status,
        "Status",
        filters.status.map(|s| s.label()),
    );

    // Search shows what is being typed; a dim marker means it is not applied yet
    let focused = focused_on(app, FilterField::Search);
    spans.push(label(app, focused, "Search"));
    let typed = tail_to_width(&app.search_input, SEARCH_WIDTH);
    spans.push(Span::styled(typed, Style::default().fg(app.theme.text_bright)));
    if focused {
        spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight)));
    }
    let committed = filters.search.as_deref().unwrap_or("");
    if app.search_input.trim() != committed {
        spans.push(Span::styled(" \u{21B5}", Style::default().fg(app.theme.dim)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn focused_on(app: &App, field: FilterField) -> bool {
    app.pane == Pane::Filters && app.filter_field == field
}

fn label(app: &App, focused: bool, text: &str) -> Span<'static> {
    let style = if focused {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    };
    Span::styled(format!(" {} ", text), style)
}

fn push_slot(
    app: &App,
    spans: &mut Vec<Span<'static>>,
    field: FilterField,
    name: &str,
    value: Option<&'static str>,
) {
    let focused = focused_on(app, field);
    spans.push(label(app, focused, name));
    let (text, style) = match value {
        Some(v) => (v, Style::default().fg(app.theme.text_bright)),
        None => ("Any", Style::default().fg(app.theme.dim)),
    };
    let style = if focused {
        style.bg(app.theme.selection_bg)
    } else {
        style
    };
    spans.push(Span::styled(text, style));
    spans.push(Span::raw(" "));
}
