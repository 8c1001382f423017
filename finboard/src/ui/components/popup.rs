//! Shared popup/modal base component.

use ratatui::prelude::Rect;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout},
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::layouts;

/// Render a popup frame sized as a percentage of the parent and return the
/// inner area for content.
///
/// Clears whatever was drawn underneath before drawing the titled border.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let area = layouts::centered_popup(size.0, size.1, parent_area);
    draw_frame(f, area, title, border_style)
}

/// Like [`render_popup_frame`], but exactly `lines` rows of content tall.
/// Forms use this so their fields never get squeezed on short terminals.
pub fn render_fixed_popup(
    f: &mut Frame,
    parent_area: Rect,
    width_percent: u16,
    lines: u16,
    title: &str,
    border_style: Style,
) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(lines + 2)])
        .flex(Flex::Center)
        .areas(parent_area);
    let [area] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    draw_frame(f, area, title, border_style)
}

fn draw_frame(f: &mut Frame, area: Rect, title: &str, border_style: Style) -> Rect {
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
