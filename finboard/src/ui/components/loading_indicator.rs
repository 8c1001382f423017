use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::LoadingState;
use crate::ui::theme;

/// Spinner while loading, a check once loaded, a cross after a failure
pub fn render_loading_indicator(f: &mut Frame, area: Rect, loading_state: &LoadingState) {
    let (text, color) = match loading_state {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let spinner = throbber_widgets_tui::Throbber::default()
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(spinner, area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => ("✓", theme::COLOR_POSITIVE),
        LoadingState::Error(_) => ("x", theme::COLOR_NEGATIVE),
    };

    let indicator =
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Right);

    f.render_widget(indicator, area);
}
