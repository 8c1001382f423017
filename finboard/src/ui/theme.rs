//! Centralized theme constants and style functions for consistent UI styling.
//!
//! All colors, layout constants, and common styles should be defined here
//! to ensure visual consistency across all screens and components.

use finboard_api::endpoints::transactions::TxnType;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Color for positive amounts (credits, income)
pub const COLOR_POSITIVE: Color = Color::Green;

/// Color for negative amounts (debits, expenses)
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Color for zero amounts and unknown transaction types
pub const COLOR_ZERO: Color = Color::DarkGray;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border color for danger/warning popups (delete confirmations, alerts)
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border color for informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Background for form fields when focused
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

/// Budget gauge fill while under the limit
pub const COLOR_GAUGE_OK: Color = Color::Green;

/// Budget gauge fill once the limit is exceeded
pub const COLOR_GAUGE_OVER: Color = Color::Red;

/// Bars of the spending distribution chart
pub const COLOR_CHART_BAR: Color = Color::Magenta;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the tab bar at the top of every page
pub const TAB_BAR_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of filter input when visible
pub const FILTER_INPUT_HEIGHT: u16 = 3;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

/// Height of summary/stat cards
pub const SUMMARY_CARD_HEIGHT: u16 = 3;

/// Height of one budget card (border, gauge, detail line, border)
pub const BUDGET_CARD_HEIGHT: u16 = 5;

/// Width of the toast stack in the top-right corner
pub const TOAST_WIDTH: u16 = 40;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles and the active tab
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

/// Style for form fields when focused
pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for danger/warning borders (delete confirmations, alerts)
pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

/// Style for info borders
pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

/// Style for accent borders
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

/// Style for inline validation errors inside forms
pub fn error_style() -> Style {
    Style::default()
        .fg(COLOR_NEGATIVE)
        .add_modifier(Modifier::BOLD)
}

// =============================================================================
// Amount Color Helpers
// =============================================================================

/// Get the appropriate color for an amount value.
/// Positive = green, negative = red, zero = gray
pub fn amount_color(amount: f64) -> Color {
    if amount > 0.0 {
        COLOR_POSITIVE
    } else if amount < 0.0 {
        COLOR_NEGATIVE
    } else {
        COLOR_ZERO
    }
}

/// Credits are green, debits red, anything else gray
pub fn txn_type_color(txn_type: TxnType) -> Color {
    match txn_type {
        TxnType::Credit => COLOR_POSITIVE,
        TxnType::Debit => COLOR_NEGATIVE,
        TxnType::Other => COLOR_ZERO,
    }
}

pub fn gauge_color(over_limit: bool) -> Color {
    if over_limit {
        COLOR_GAUGE_OVER
    } else {
        COLOR_GAUGE_OK
    }
}

/// Budget warnings share the gauge palette: red for an alert, green otherwise
pub fn warning_style(is_alert: bool) -> Style {
    Style::default().fg(gauge_color(is_alert))
}
