use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bordered card: label as the title, value bold and centered
pub fn render_stat_card(f: &mut Frame, area: Rect, label: &str, value: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL).title(label);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}
