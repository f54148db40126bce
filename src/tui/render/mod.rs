pub mod filter_bar;
pub mod form_view;
pub mod list_view;
pub mod stats_view;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use regex::Regex;

use super::app::{App, Pane};
use crate::util::unicode::display_width;

/// Rows taken by the intake form including its border
const FORM_HEIGHT: u16 = 10;

/// Main render function, lays out every pane
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | panes | status row (1 row)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
        .split(columns[0]);
    form_view::render_form(frame, app, left[0]);
    stats_view::render_stats(frame, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);
    filter_bar::render_filter_bar(frame, app, right[0]);
    list_view::render_list(frame, app, right[1]);

    status_row::render_status_row(frame, app, rows[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let title = Span::styled(
        " ticket-desk",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let count = app.collection.tickets().len();
    let mut summary = format!("{} ticket{}", count, plural(count));
    let active = app.collection.filters().active_count();
    if active > 0 {
        summary.push_str(&format!(" \u{00B7} {} filter{} active", active, plural(active)));
    }
    if app.collection.is_loading() {
        summary.push_str(" \u{00B7} loading\u{2026}");
    }
    summary.push(' ');

    let used = display_width(&title.content) + display_width(&summary);
    let padding = width.saturating_sub(used);
    let line = Line::from(vec![
        title,
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(summary, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Bordered block for a pane, highlighted when it has focus
pub(super) fn pane_block<'a>(app: &App, pane: Option<Pane>, title: String) -> Block<'a> {
    let focused = pane.is_some_and(|p| p == app.pane);
    let border = if focused { app.theme.highlight } else { app.theme.dim };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(app.theme.background))
        .title(Span::styled(
            title,
            Style::default()
                .fg(if focused { app.theme.text_bright } else { app.theme.text })
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background))
}

/// Case-insensitive literal matcher for the committed search term
pub(super) fn search_regex(app: &App) -> Option<Regex> {
    let term = app.collection.filters().search.as_deref()?;
    Regex::new(&format!("(?i){}", regex::escape(term))).ok()
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(text[last_end..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::{TERM_H, TERM_W, render_to_string, test_app};
    use super::*;
    use crate::api::fake::ticket;
    use crate::model::Category;
    use ratatui::style::Color;

    #[test]
    fn test_empty_dashboard() {
        let (mut app, _api) = test_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("ticket-desk"));
        assert!(out.contains("0 tickets"));
        assert!(out.contains("New ticket"));
        assert!(out.contains("Tickets"));
        assert!(out.contains("No tickets found"));
    }

    #[tokio::test]
    async fn test_header_counts_filters() {
        let (mut app, _api) = test_app();
        app.collection.create(ticket("1", "Refund"));
        let mut filters = app.collection.filters().clone();
        filters.category = Some(Category::Billing);
        app.collection.set_filters(filters);

        let out = render_to_string(TERM_W, 1, |frame, area| render_header(frame, &app, area));
        assert!(out.contains("1 ticket \u{00B7} 1 filter active \u{00B7} loading"));
    }

    #[test]
    fn test_highlight_splits_on_matches() {
        let re = Regex::new("(?i)ref").unwrap();
        let base = Style::default();
        let hl = Style::default().bg(Color::Cyan);
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Refund refused", base, hl, Some(&re));
        let parts: Vec<(&str, bool)> = spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style == hl))
            .collect();
        assert_eq!(
            parts,
            vec![("Ref", true), ("und ", false), ("ref", true), ("used", false)]
        );
    }

    #[test]
    fn test_highlight_without_regex() {
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "plain", Style::default(), Style::default(), None);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "plain");
    }
}
