//! Shared placeholder blocks for lists with nothing to show.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

/// Render an empty state message with consistent styling.
///
/// # Arguments
/// * `title` - The block title (e.g., "Categories", "Transactions")
/// * `message` - The message to display (e.g., "No categories yet")
/// * `hint` - Optional hint text below the message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::loading_style())),
    ];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            theme::help_text_style(),
        )));
    }

    render_centered(f, area, title, lines);
}

/// Shown while the first fetch of a page is in flight
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::loading_style())),
    ];

    render_centered(f, area, title, lines);
}

/// Shown after a failed fetch, until the user refreshes
pub fn render_error_state(f: &mut Frame, area: Rect, title: &str, error: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(error, theme::error_style())),
        Line::from(""),
        Line::from(Span::styled("Press r to retry", theme::help_text_style())),
    ];

    render_centered(f, area, title, lines);
}

fn render_centered(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default())
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
