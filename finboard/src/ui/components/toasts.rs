use ratatui::{
    layout::{Constraint, Layout},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notifications::NotificationQueue;
use crate::ui::{layouts, theme, utils};

/// Newest toasts that still fit on screen, stacked top-right, oldest on top
pub fn render_toasts(f: &mut Frame, notifications: &NotificationQueue) {
    if notifications.is_empty() {
        return;
    }

    let max_visible = (f.area().height / 3).max(1) as usize;
    let skip = notifications.len().saturating_sub(max_visible);
    let visible: Vec<_> = notifications.iter().skip(skip).collect();

    let area = layouts::toast_area(f.area(), visible.len());
    let slots = Layout::vertical(vec![Constraint::Length(3); visible.len()]).split(area);

    let text_width = area.width.saturating_sub(2) as usize;
    for (notification, slot) in visible.iter().zip(slots.iter()) {
        f.render_widget(Clear, *slot);
        let toast = Paragraph::new(utils::truncate(&notification.message, text_width))
            .style(theme::form_field_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::info_border_style()),
            );
        f.render_widget(toast, *slot);
    }
}
