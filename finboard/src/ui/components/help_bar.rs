//! Shared help bar component for consistent bottom key hints.

use itertools::Itertools;
use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a help bar from `(key, action)` pairs, e.g. `[("n", "new")]`
/// becomes `n: new`, separated by pipes.
pub fn render_help_bar(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let pairs = keys.iter().map(|(key, action)| {
        vec![
            Span::styled(key.to_string(), theme::header_style()),
            Span::styled(format!(": {}", action), theme::help_text_style()),
        ]
    });
    let separator = vec![Span::styled(" | ", theme::help_text_style())];
    let spans: Vec<Span> = Itertools::intersperse(pairs, separator)
        .flatten()
        .collect();

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

/// Keys shared by every page, appended after the page-specific ones
pub const GLOBAL_KEYS: &[(&str, &str)] = &[("1-4/Tab", "pages"), ("?", "help"), ("q", "quit")];
