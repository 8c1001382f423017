use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{CategoriesState, InputMode, LoadingState, Page};
use crate::ui::{
    components::{delete_confirmation, empty_state, forms, help_bar, screen_title},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &CategoriesState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        Page::Categories,
        &state.categories_loading,
        None,
    );
    render_content(f, content_area, state);

    let mut keys = vec![
        ("n", "new"),
        ("e", "edit"),
        ("d", "delete"),
        ("r", "refresh"),
    ];
    keys.extend_from_slice(help_bar::GLOBAL_KEYS);
    help_bar::render_help_bar(f, help_area, &keys);

    match state.input_mode {
        InputMode::CategoryForm => {
            if let Some(ref form) = state.form {
                forms::render_category_form(f, form);
            }
        }
        InputMode::DeleteConfirmation => {
            if let Some(category) = state.pending_delete() {
                delete_confirmation::render_delete_confirmation(f, &category.name);
            }
        }
        _ => {}
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &CategoriesState) {
    if state.categories.is_empty() {
        match &state.categories_loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Status", "Loading categories...")
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Categories", error)
            }
            _ => empty_state::render_empty_state(
                f,
                area,
                "Categories",
                "No categories yet",
                Some("Press n to create one"),
            ),
        }
        return;
    }

    let header = Row::new(vec![Cell::from("Name"), Cell::from("Keywords")])
        .style(theme::header_style())
        .underlined();

    let rows: Vec<Row> = state
        .categories
        .iter()
        .map(|c| {
            let keywords = match c.keywords.as_deref() {
                Some(k) if !k.trim().is_empty() => Cell::from(k.to_string()),
                _ => Cell::from(Span::styled("-", theme::help_text_style())),
            };
            Row::new(vec![Cell::from(c.name.clone()), keywords])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Categories ({})", state.categories.len())),
        )
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
