use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::TicketStats;
use crate::tui::app::App;
use crate::util::unicode::pad_to_width;

use super::pane_block;

const BAR_LABEL_WIDTH: usize = 12;
const BAR_COUNT_WIDTH: usize = 5;

pub fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let mut title = " Stats ".to_string();
    if app.stats.is_loading() {
        title = " Stats \u{00B7} refreshing\u{2026} ".to_string();
    }
    let block = pane_block(app, None, title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    if let Some(err) = app.stats.error() {
        lines.push(Line::from(Span::styled(
            format!("! {}", err),
            Style::default().fg(app.theme.red),
        )));
    }

    match app.stats.stats() {
        Some(stats) => lines.extend(stats_lines(app, stats, inner.width as usize)),
        None if app.stats.is_loading() => lines.push(Line::from(Span::styled(
            "Loading\u{2026}",
            Style::default().fg(app.theme.dim),
        ))),
        None => {}
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn stats_lines(app: &App, stats: &TicketStats, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let label = Style::default().fg(theme.dim);
    let value = Style::default().fg(theme.text_bright).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total ", label),
            Span::styled(stats.total_tickets.to_string(), value),
            Span::styled("   Open ", label),
            Span::styled(stats.open_tickets.to_string(), value),
            Span::styled("   Avg/day ", label),
            Span::styled(format!("{:.1}", stats.avg_tickets_per_day), value),
        ]),
        Line::default(),
        Line::from(Span::styled("By priority", label)),
    ];

    let max = stats.max_breakdown();
    let bar_max = width.saturating_sub(BAR_LABEL_WIDTH + BAR_COUNT_WIDTH);
    for (priority, n) in stats.priority_breakdown.entries() {
        lines.push(bar_line(priority.label(), n, max, bar_max, theme.priority_color(priority), theme.text));
    }
    lines.push(Line::from(Span::styled("By category", label)));
    for (category, n) in stats.category_breakdown.entries() {
        lines.push(bar_line(category.label(), n, max, bar_max, theme.category_color(category), theme.text));
    }
    lines
}

/// Length of a bar for `n` out of `max`, rounded, never empty for a nonzero count
fn bar_len(n: u64, max: u64, bar_max: usize) -> usize {
    if n == 0 || max == 0 || bar_max == 0 {
        return 0;
    }
    let len = (n as f64 / max as f64 * bar_max as f64).round() as usize;
    len.clamp(1, bar_max)
}

fn bar_line(name: &str, n: u64, max: u64, bar_max: usize, color: Color, text: Color) -> Line<'static> {
    let len = bar_len(n, max, bar_max);
    Line::from(vec![
        Span::styled(format!("  {}", pad_to_width(name, BAR_LABEL_WIDTH - 2)), Style::default().fg(text)),
        Span::styled("\u{2588}".repeat(len), Style::default().fg(color)),
        Span::styled(format!(" {}", n), Style::default().fg(text)),
    ])
}
