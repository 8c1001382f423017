use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::InputMode;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Dashboard(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("c", "Cycle display currency"));
            items.push(("r", "Refresh dashboard"));
        }
        Screen::Transactions(state) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("]/→/l", "Next account"));
            items.push(("[/←/h", "Previous account"));
            items.push(("n", "Add a transaction"));
            items.push(("i", "Import a CSV statement"));
            items.push(("c", "Cycle display currency"));
            items.push(("/", "Enter filter mode"));
            if state.input_mode == InputMode::Filter {
                items.push(("Type", "Filter by description, category, amount or type"));
                items.push(("Enter", "Exit filter mode (keep filter active)"));
                items.push(("Esc", "Clear filter and exit filter mode"));
                items.push(("Backspace", "Delete last character"));
            }
            items.push(("r", "Refresh transactions"));
        }
        Screen::Categories(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("n", "Create a category"));
            items.push(("e/Enter", "Edit selected category"));
            items.push(("d/Delete", "Delete selected category"));
            items.push(("r", "Refresh categories"));
        }
        Screen::Budgets(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("n", "Add a budget"));
            items.push(("d/Delete", "Delete selected budget"));
            items.push(("r", "Refresh budgets"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
            items.push(("h/←/Esc", "Back to the page"));
        }
    }

    items.push(("", ""));
    items.push(("--- Forms ---", ""));
    items.push(("Tab/↓", "Next field"));
    items.push(("Shift+Tab/↑", "Previous field"));
    items.push(("Enter", "Submit"));
    items.push(("Esc", "Cancel"));

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("1-4", "Dashboard, Transactions, Categories, Budgets"));
    items.push(("Tab", "Next page"));
    items.push(("g then d/t/c/b", "Go to a page"));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
