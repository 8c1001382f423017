//! Filter input shown above the transactions table while filtering.

use ratatui::prelude::Rect;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

pub fn render_filter_input(f: &mut Frame, area: Rect, query: &str) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled(query, theme::loading_style()),
        Span::styled("_", theme::help_text_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filter (Enter: keep, Esc: clear)"),
    );

    f.render_widget(input, area);
}
