use crate::state::{BudgetFormState, CategoryFormState, TransactionFormState};
use finboard_api::endpoints::{
    budgets::NewBudget, categories::SaveCategory, transactions::NewTransaction,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid {field}: {input}")]
    InvalidNumber { field: &'static str, input: String },

    #[error("{0} cannot be negative")]
    Negative(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("Month must be between 1 and 12")]
    MonthOutOfRange,
}

/// Validate and build a NewTransaction from form state
pub fn validate_transaction_form(
    form: &TransactionFormState,
) -> Result<NewTransaction, ValidationError> {
    let description = required(&form.description, "Description")?;
    let amount = parse_amount(&form.amount, "Amount")?;
    if amount < 0.0 {
        return Err(ValidationError::Negative("Amount"));
    }

    Ok(NewTransaction {
        account_id: form.account_id,
        description,
        amount,
        txn_type: form.txn_type,
    })
}

/// Validate and build the create/update body from form state.
/// Keywords are free text and may be left empty.
pub fn validate_category_form(form: &CategoryFormState) -> Result<SaveCategory, ValidationError> {
    Ok(SaveCategory {
        name: required(&form.name, "Name")?,
        keywords: form.keywords.trim().to_string(),
    })
}

/// Validate and build a NewBudget from form state
pub fn validate_budget_form(form: &BudgetFormState) -> Result<NewBudget, ValidationError> {
    let category = required(&form.category, "Category")?;

    let limit_amount = parse_amount(&form.limit, "Limit")?;
    if limit_amount <= 0.0 {
        return Err(ValidationError::NotPositive("Limit"));
    }

    let month: u32 = parse_number(&form.month, "Month")?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange);
    }
    let year: i32 = parse_number(&form.year, "Year")?;

    Ok(NewBudget {
        category,
        limit_amount,
        month,
        year,
    })
}

/// Parse a decimal amount, tolerating thousands separators and a leading
/// currency symbol.
pub fn parse_amount(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(['₹', '$', '€', '£', '¥'])
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::Required(field));
    }

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::InvalidNumber {
            field,
            input: input.trim().to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(
    input: &str,
    field: &'static str,
) -> Result<T, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        input: trimmed.to_string(),
    })
}

fn required(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}
