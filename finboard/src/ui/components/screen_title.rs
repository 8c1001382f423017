//! Page tab bar with the loading indicator on the right.

use ratatui::prelude::Rect;
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::state::{LoadingState, Page};
use crate::ui::{layouts, theme};

/// Render the tab bar with `current` highlighted. `extra` is appended after the
/// tabs (the display currency on pages that convert amounts).
pub fn render_screen_title(
    f: &mut Frame,
    area: Rect,
    current: Page,
    loading_state: &LoadingState,
    extra: Option<&str>,
) {
    let (tabs_area, indicator_area) = layouts::title_with_loading(area);

    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!("{} {}", i + 1, page.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(current.index())
        .style(theme::help_text_style())
        .highlight_style(theme::title_style())
        .divider(Span::raw("|"));

    match extra {
        Some(extra) => {
            let [tabs_area, extra_area] = Layout::horizontal([
                Constraint::Min(0),
                Constraint::Length(extra.chars().count() as u16 + 2),
            ])
            .areas(tabs_area);
            f.render_widget(tabs, tabs_area);
            f.render_widget(
                Paragraph::new(Span::styled(extra, theme::header_style())),
                extra_area,
            );
        }
        None => f.render_widget(tabs, tabs_area),
    }
    super::loading_indicator::render_loading_indicator(f, indicator_area, loading_state);
}
