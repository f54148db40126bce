use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    let mut used = 0;
    // A failed status change has no other place to surface
    if let Some(err) = app.collection.update_error() {
        let text = truncate_to_width(&format!(" {}", err), width);
        used = display_width(&text);
        spans.push(Span::styled(text, Style::default().fg(app.theme.red).bg(bg)));
    }

    let hint = hints(app);
    let hint_width = display_width(hint);
    if used + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hints(app: &App) -> &'static str {
    match app.pane {
        Pane::Form if app.intake.draft().is_editing() => {
            "\u{2191}\u{2193} field  \u{2190}\u{2192} choose  ^S save  Esc cancel  Tab pane  ^Q quit "
        }
        Pane::Form => "\u{2191}\u{2193} field  \u{2190}\u{2192} choose  ^S submit  Tab pane  ^Q quit ",
        Pane::Filters => "\u{2190}\u{2192} cycle  type to search  Enter apply  Del clear  Tab pane ",
        Pane::List => "j/k move  Enter expand  s status  e edit  r refresh  Tab pane ",
    }
}
