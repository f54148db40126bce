use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Ticket;
use crate::tui::app::{App, Pane};
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

use super::{pane_block, push_highlighted_spans, search_regex};

/// Render the ticket list. Adjusts `list_scroll` so the cursor stays visible.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut title = " Tickets ".to_string();
    if app.collection.is_loading() {
        title = " Tickets \u{00B7} loading\u{2026} ".to_string();
    }
    let block = pane_block(app, Some(Pane::List), title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    // A failed fetch keeps the previous tickets on screen under a banner
    if let Some(err) = app.collection.error() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("! {}", err), width),
            Style::default().fg(app.theme.red).add_modifier(Modifier::BOLD),
        )));
    }

    if app.collection.tickets().is_empty() {
        if !app.collection.is_loading() {
            lines.push(Line::from(Span::styled(
                "No tickets found",
                Style::default().fg(app.theme.dim),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let banner_rows = lines.len();
    let visible = (inner.height as usize).saturating_sub(banner_rows).max(1);
    let expanded_rows = if app.expanded.is_some() { EXPANDED_ROWS } else { 0 };
    adjust_scroll(app, visible.saturating_sub(expanded_rows).max(1));

    let search_re = search_regex(app);
    let focused = app.pane == Pane::List;
    for (i, ticket) in app
        .collection
        .tickets()
        .iter()
        .enumerate()
        .skip(app.list_scroll)
    {
        if lines.len() >= banner_rows + visible {
            break;
        }
        let selected = focused && i == app.list_cursor;
        lines.push(ticket_row(app, ticket, selected, width, search_re.as_ref()));
        if app.expanded.as_ref() == Some(&ticket.id) {
            lines.extend(expanded_rows_for(app, ticket, width));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Rows added under an expanded ticket
const EXPANDED_ROWS: usize = 3;

fn adjust_scroll(app: &mut App, visible: usize) {
    if app.list_cursor < app.list_scroll {
        app.list_scroll = app.list_cursor;
    } else if app.list_cursor >= app.list_scroll + visible {
        app.list_scroll = app.list_cursor + 1 - visible;
    }
}

fn ticket_row<'a>(
    app: &App,
    ticket: &Ticket,
    selected: bool,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.background };
    let base = Style::default().bg(bg);

    let mut spans = vec![
        Span::styled(if selected { "\u{25B8}" } else { " " }, base.fg(theme.highlight)),
        Span::styled(
            pad_to_width(&format!("#{}", ticket.id), 6),
            base.fg(theme.dim),
        ),
        Span::styled(
            pad_to_width(ticket.status.label(), 12),
            base.fg(theme.status_color(ticket.status)),
        ),
        Span::styled(
            pad_to_width(ticket.priority.label(), 9),
            base.fg(theme.priority_color(ticket.priority)),
        ),
        Span::styled(
            pad_to_width(ticket.category.label(), 10),
            base.fg(theme.category_color(ticket.category)),
        ),
    ];

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let updating = app.collection.is_updating(&ticket.id);
    let suffix = if updating { " \u{2026}" } else { "" };
    let title_width = width.saturating_sub(used + display_width(suffix));
    let title = truncate_to_width(&ticket.title, title_width);
    let title_style = if selected {
        base.fg(theme.text_bright).add_modifier(Modifier::BOLD)
    } else {
        base.fg(theme.text)
    };
    push_highlighted_spans(
        &mut spans,
        &title,
        title_style,
        Style::default()
            .fg(theme.search_match_fg)
            .bg(theme.search_match_bg),
        search_re,
    );
    if updating {
        spans.push(Span::styled(suffix, base.fg(theme.dim)));
    }
    Line::from(spans)
}

fn expanded_rows_for<'a>(app: &App, ticket: &Ticket, width: usize) -> Vec<Line<'a>> {
    let indent = "       ";
    let avail = width.saturating_sub(indent.len());
    let dim = Style::default().fg(app.theme.dim);

    let mut created = format!("created {}", ticket.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(updated) = ticket.updated_at {
        created.push_str(&format!("  updated {}", updated.format("%Y-%m-%d %H:%M")));
    }
    vec![
        Line::from(vec![
            Span::raw(indent),
            Span::styled(
                truncate_to_width(&ticket.description, avail),
                Style::default().fg(app.theme.text),
            ),
        ]),
        Line::from(vec![Span::raw(indent), Span::styled(created, dim)]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled("s next status  e edit", dim),
        ]),
    ]
}
