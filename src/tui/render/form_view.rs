use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::intake::Notice;
use crate::tui::app::{App, FormField, Pane};
use crate::util::unicode::{display_width, pad_to_width, tail_to_width, truncate_to_width};

use super::pane_block;

const LABEL_WIDTH: usize = 12;

/// Render the intake form: text fields, the two suggestible selects,
/// the submit row and the notice line
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.intake.draft();
    let title = match &draft.editing {
        Some(id) => format!(" Edit #{} ", id),
        None => " New ticket ".to_string(),
    };
    let block = pane_block(app, Some(Pane::Form), title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let suggestion = app.intake.suggestion();
    let status = app.intake.status();

    let mut lines = vec![
        text_line(app, FormField::Title, "Title", &draft.title, value_width),
        text_line(app, FormField::Description, "Description", &draft.description, value_width),
        select_line(
            app,
            FormField::Category,
            "Category",
            draft.category.map(|c| (c.label(), app.theme.category_color(c))),
            "General",
            suggestion.map(|s| s.category).filter(|c| c.is_known()).map(|c| c.label()),
        ),
        select_line(
            app,
            FormField::Priority,
            "Priority",
            draft.priority.map(|p| (p.label(), app.theme.priority_color(p))),
            "Medium",
            suggestion.map(|s| s.priority).filter(|p| p.is_known()).map(|p| p.label()),
        ),
        Line::default(),
        submit_line(app, draft.is_editing(), status.classifying, status.submitting),
    ];

    if let Some(notice) = &status.notice {
        let color = match notice {
            Notice::Success(_) => app.theme.green,
            Notice::Error(_) => app.theme.red,
        };
        lines.push(Line::from(Span::styled(
            truncate_to_width(notice.text(), inner.width as usize),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn is_focused(app: &App, field: FormField) -> bool {
    app.pane == Pane::Form && app.form_field == field
}

fn label_span(app: &App, field: FormField, label: &str) -> Span<'static> {
    let focused = is_focused(app, field);
    let marker = if focused { "\u{25B8}" } else { " " };
    let style = if focused {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    };
    Span::styled(format!("{}{}", marker, pad_to_width(label, LABEL_WIDTH)), style)
}

fn text_line(app: &App, field: FormField, label: &str, value: &str, width: usize) -> Line<'static> {
    let focused = is_focused(app, field);
    let mut spans = vec![label_span(app, field, label)];
    if focused {
        // keep the end visible while typing, leaving a cell for the cursor
        let shown = tail_to_width(value, width.saturating_sub(1));
        spans.push(Span::styled(shown, Style::default().fg(app.theme.text_bright)));
        spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight)));
    } else if value.is_empty() {
        spans.push(Span::styled("\u{2014}", Style::default().fg(app.theme.dim)));
    } else {
        spans.push(Span::styled(
            truncate_to_width(value, width),
            Style::default().fg(app.theme.text),
        ));
    }
    Line::from(spans)
}

/// A select row. Unset values show the submit default dimmed; a pending
/// suggestion is shown alongside.
fn select_line(
    app: &App,
    field: FormField,
    label: &str,
    value: Option<(&'static str, Color)>,
    default: &str,
    suggested: Option<&'static str>,
) -> Line<'static> {
    let mut spans = vec![label_span(app, field, label)];
    let shown = match value {
        Some((text, color)) => {
            spans.push(Span::styled(text, Style::default().fg(color)));
            text.to_string()
        }
        None => {
            let text = format!("({})", default);
            spans.push(Span::styled(text.clone(), Style::default().fg(app.theme.dim)));
            text
        }
    };
    if is_focused(app, field) {
        spans.push(Span::styled(" \u{2190}\u{2192}", Style::default().fg(app.theme.dim)));
    }
    if let Some(suggested) = suggested {
        let gap = 11usize.saturating_sub(display_width(&shown)).max(2);
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(
            format!("AI suggested: {}", suggested),
            Style::default().fg(app.theme.purple).add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

fn submit_line(app: &App, editing: bool, classifying: bool, submitting: bool) -> Line<'static> {
    let focused = is_focused(app, FormField::Submit);
    let label = match (editing, submitting) {
        (_, true) => "[ Saving\u{2026} ]",
        (true, false) => "[ Save changes ]",
        (false, false) => "[ Submit ]",
    };
    let style = if focused {
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text_bright)
    };

    let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH + 1)), Span::styled(label, style)];
    if classifying {
        spans.push(Span::styled(
            "  classifying\u{2026}",
            Style::default().fg(app.theme.purple),
        ));
    }
    if editing {
        spans.push(Span::styled("  Esc cancel", Style::default().fg(app.theme.dim)));
    }
    Line::from(spans)
}
