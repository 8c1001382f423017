use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::{layouts, theme};

/// Render a confirmation popup before deleting the named category
pub fn render_delete_confirmation(f: &mut Frame, category_name: &str) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        " Confirm Delete ",
        theme::danger_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Warning message
            Constraint::Length(1), // Empty line
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    let warning = Paragraph::new(format!("Delete category \"{}\"?", category_name))
        .style(theme::loading_style().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(warning, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled(
            "[Y]es ",
            Style::default()
                .fg(theme::COLOR_POSITIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled(
            "[N]o ",
            Style::default()
                .fg(theme::COLOR_NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled("[Esc]", Style::default().fg(theme::COLOR_HELP_TEXT)),
        Span::raw(" Cancel"),
    ]);
    f.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[2],
    );
}
