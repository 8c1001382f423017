use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::LogBuffer;
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme, utils,
};

const TARGET_WIDTH: usize = 25;

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let mut title = format!("Session Logs ({} entries)", state.total_entries);
    if state.scroll_offset > 0 {
        title.push_str(&format!(", scrolled {} from bottom", state.scroll_offset));
    }
    f.render_widget(Paragraph::new(title).style(theme::title_style()), title_area);

    render_logs(f, content_area, state, log_buffer);

    help_bar::render_help_bar(
        f,
        help_area,
        &[
            ("j/k", "scroll"),
            ("PgUp/PgDn", "page"),
            ("gg/G", "oldest/newest"),
            ("h", "back"),
            ("?", "help"),
        ],
    );
}

fn render_logs(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    if log_buffer.is_empty() {
        empty_state::render_empty_state(f, area, "Session Logs", "No logs yet", None);
        return;
    }

    // Newest at the bottom; header and borders take three rows
    let inner_height = area.height.saturating_sub(4) as usize;
    let (start, entries) = log_buffer.window(state.scroll_offset, inner_height);
    let total = log_buffer.len();

    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                level_label(entry.level).to_string(),
                utils::truncate(&entry.target, TARGET_WIDTH),
                entry.message.clone(),
            ])
            .style(level_style(entry.level))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(TARGET_WIDTH as u16),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Logs [{}-{} of {}] ",
            start + 1,
            start + entries.len(),
            total
        )))
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn level_style(level: Level) -> Style {
    match level {
        Level::ERROR => Style::default()
            .fg(theme::COLOR_NEGATIVE)
            .add_modifier(Modifier::BOLD),
        Level::WARN => Style::default().fg(theme::COLOR_LOADING),
        Level::INFO => Style::default().fg(theme::COLOR_POSITIVE),
        Level::DEBUG => Style::default().fg(Color::Blue),
        Level::TRACE => Style::default().fg(theme::COLOR_ZERO),
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}
