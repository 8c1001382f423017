//! Modal forms: add transaction, create/edit category, add budget, and the
//! CSV path prompt. All share one layout: a label column, a value column, the
//! focused row highlighted, and the last validation error underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{
    BudgetField, BudgetFormState, CategoryField, CategoryFormState, FormField, TransactionField,
    TransactionFormState,
};
use crate::ui::theme;

const LABEL_WIDTH: u16 = 14;
const FORM_WIDTH_PERCENT: u16 = 60;

struct FormRow<'a> {
    label: &'static str,
    value: &'a str,
    placeholder: &'static str,
    focused: bool,
}

fn row<'a, F: FormField>(
    field: F,
    current: F,
    value: &'a str,
    placeholder: &'static str,
) -> FormRow<'a> {
    FormRow {
        label: field.label(),
        value,
        placeholder,
        focused: field == current,
    }
}

fn render_form(
    f: &mut Frame,
    title: &str,
    rows: &[FormRow],
    error: Option<&str>,
    footer: &str,
) {
    // One line per field, a spacer, the error line and the footer
    let lines = rows.len() as u16 + 3;
    let inner = super::popup::render_fixed_popup(
        f,
        f.area(),
        FORM_WIDTH_PERCENT,
        lines,
        title,
        theme::accent_border_style(),
    );

    let mut constraints = vec![Constraint::Length(1); rows.len()];
    constraints.extend([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ]);
    let areas = Layout::vertical(constraints).split(inner);

    for (row, area) in rows.iter().zip(areas.iter()) {
        render_row(f, *area, row);
    }

    let n = rows.len();
    if let Some(error) = error {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", error), theme::error_style())),
            areas[n + 1],
        );
    }
    f.render_widget(
        Paragraph::new(Span::styled(footer, theme::help_text_style())),
        areas[n + 2],
    );
}

fn render_row(f: &mut Frame, area: Rect, row: &FormRow) {
    let [label_area, value_area] =
        Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).areas(area);

    let label_style = if row.focused {
        theme::header_style()
    } else {
        theme::help_text_style()
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}:", row.label), label_style)),
        label_area,
    );

    let (value, style) = if row.value.is_empty() {
        (row.placeholder, theme::help_text_style())
    } else if row.focused {
        (row.value, theme::form_field_focused_style())
    } else {
        (row.value, theme::form_field_style())
    };
    let mut spans = vec![Span::styled(value, style)];
    if row.focused {
        spans.push(Span::styled("_", theme::loading_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), value_area);
}

pub fn render_transaction_form(f: &mut Frame, form: &TransactionFormState, account: &str) {
    let txn_type = form.txn_type.to_string();
    let current = form.current_field;
    let rows = [
        row(
            TransactionField::Description,
            current,
            &form.description,
            "e.g. Grocery run",
        ),
        row(TransactionField::Amount, current, &form.amount, "0.00"),
        row(TransactionField::Type, current, &txn_type, ""),
    ];

    let footer = if form.submitting {
        "Saving..."
    } else if current == TransactionField::Type {
        "Any key: toggle credit/debit | Enter: save | Esc: cancel"
    } else {
        "Tab: next field | Enter: save | Esc: cancel"
    };

    render_form(
        f,
        &format!(" Add Transaction: {} ", account),
        &rows,
        form.validation_error.as_deref(),
        footer,
    );
}

pub fn render_category_form(f: &mut Frame, form: &CategoryFormState) {
    let current = form.current_field;
    let rows = [
        row(CategoryField::Name, current, &form.name, "required"),
        row(
            CategoryField::Keywords,
            current,
            &form.keywords,
            "comma separated, optional",
        ),
    ];

    let title = if form.is_edit_mode() {
        " Edit Category "
    } else {
        " New Category "
    };
    let footer = if form.submitting {
        "Saving..."
    } else {
        "Tab: next field | Enter: save | Esc: cancel"
    };

    render_form(f, title, &rows, form.validation_error.as_deref(), footer);
}

pub fn render_budget_form(f: &mut Frame, form: &BudgetFormState) {
    let current = form.current_field;
    let rows = [
        row(BudgetField::Category, current, &form.category, "e.g. Food"),
        row(BudgetField::Limit, current, &form.limit, "0.00"),
        row(BudgetField::Month, current, &form.month, "1-12"),
        row(BudgetField::Year, current, &form.year, "YYYY"),
    ];

    render_form(
        f,
        " Add Budget ",
        &rows,
        form.validation_error.as_deref(),
        "Tab: next field | Enter: save | Esc: cancel",
    );
}

/// Single-line prompt for the path of a CSV statement to upload
pub fn render_csv_prompt(f: &mut Frame, path: &str) {
    let rows = [FormRow {
        label: "File",
        value: path,
        placeholder: "/path/to/statement.csv",
        focused: true,
    }];

    render_form(
        f,
        " Import CSV ",
        &rows,
        None,
        "Enter: upload | Esc: cancel",
    );
}
