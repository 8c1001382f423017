//! Reusable layout builders for consistent screen structure.
//!
//! These functions provide standard layouts that all screens should use
//! to ensure consistent margins, spacing, and element positioning.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    FILTER_INPUT_HEIGHT, HELP_BAR_HEIGHT, SCREEN_MARGIN, TAB_BAR_HEIGHT, TOAST_WIDTH,
};

/// Standard screen layout with tab bar, content area, and help bar.
///
/// Returns a tuple of (title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Screen layout with filter input visible.
///
/// Returns a tuple of (title_area, filter_area, content_area, help_area)
pub fn screen_layout_with_filter(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Length(FILTER_INPUT_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Stack of `count` one-line toasts (each boxed, so three rows tall) anchored
/// to the top-right corner, clipped to the parent area
pub fn toast_area(area: Rect, count: usize) -> Rect {
    let width = TOAST_WIDTH.min(area.width);
    let height = (count as u16).saturating_mul(3).min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

/// Split an area into `n` equal columns
pub fn equal_columns(area: Rect, n: usize) -> Vec<Rect> {
    let constraints = vec![Constraint::Ratio(1, n.max(1) as u32); n.max(1)];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Small popup (50% x 30%) - for simple confirmations and alerts
    pub const SMALL: (u16, u16) = (50, 30);

    /// Medium popup (60% x 40%) - for forms
    pub const MEDIUM: (u16, u16) = (60, 40);

    /// Large popup (80% x 80%) - for help screens and complex dialogs
    pub const LARGE: (u16, u16) = (80, 80);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_area_is_top_right() {
        let parent = Rect::new(0, 0, 100, 30);
        let area = toast_area(parent, 2);
        assert_eq!(area, Rect::new(60, 0, 40, 6));
    }

    #[test]
    fn test_toast_area_clips_to_parent() {
        let parent = Rect::new(0, 0, 20, 5);
        let area = toast_area(parent, 10);
        assert_eq!(area.width, 20);
        assert_eq!(area.height, 5);
    }

    #[test]
    fn test_equal_columns() {
        let cols = equal_columns(Rect::new(0, 0, 80, 3), 4);
        assert_eq!(cols.len(), 4);
        assert!(cols.iter().all(|c| c.width == 20));
    }
}
