use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::state::Alert;
use crate::ui::{layouts, theme};

/// Blocking error popup, drawn above everything else until dismissed
pub fn render_alert(f: &mut Frame, alert: &Alert) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        &format!(" {} ", alert.title),
        theme::danger_border_style(),
    );

    let [message_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
            .margin(1)
            .areas(inner);

    let message = Paragraph::new(alert.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, message_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", theme::header_style()),
        Span::styled(" OK", theme::help_text_style()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}
