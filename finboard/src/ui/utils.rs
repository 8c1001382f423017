use convert_case::{Case, Casing};
use finboard_api::endpoints::{
    accounts::Account,
    transactions::{Transaction, TxnType},
};
use ratatui::{style::Style, text::Span};

use super::theme;
use crate::currency::Currency;

/// "HDFC · Savings": bank name plus the account type in title case
pub fn account_label(account: &Account) -> String {
    format!(
        "{} · {}",
        account.bank_name,
        account.account_type.to_case(Case::Title)
    )
}

/// Amount in the display currency, signed by direction: debits get a leading
/// minus, credits a leading plus, anything else no sign
pub fn fmt_signed(amount: f64, txn_type: TxnType, currency: Currency) -> String {
    let formatted = currency.format(Some(amount));
    match txn_type {
        TxnType::Credit => format!("+{}", formatted),
        TxnType::Debit => format!("-{}", formatted),
        TxnType::Other => formatted,
    }
}

/// Colored, signed amount cell for a transaction row
pub fn amount_span(transaction: &Transaction, currency: Currency) -> Span<'static> {
    Span::styled(
        fmt_signed(transaction.amount, transaction.txn_type, currency),
        Style::default().fg(theme::txn_type_color(transaction.txn_type)),
    )
}

/// Date part of a backend timestamp (`2025-01-31T10:00:00` → `2025-01-31`)
pub fn fmt_date(date: Option<&str>) -> String {
    match date {
        Some(d) if d.len() >= 10 && d.is_char_boundary(10) => d[..10].to_string(),
        Some(d) if !d.is_empty() => d.to_string(),
        _ => "-".to_string(),
    }
}

/// Cut `text` to at most `max_len` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_label_title_cases_type() {
        let account = Account {
            id: 1,
            bank_name: "HDFC".to_string(),
            account_type: "fixed_deposit".to_string(),
            balance: 0.0,
        };
        assert_eq!(account_label(&account), "HDFC · Fixed Deposit");
    }

    #[test]
    fn test_fmt_signed() {
        assert_eq!(fmt_signed(100.0, TxnType::Credit, Currency::Inr), "+₹100.00");
        assert_eq!(fmt_signed(100.0, TxnType::Debit, Currency::Usd), "-$1.20");
        assert_eq!(fmt_signed(5.0, TxnType::Other, Currency::Inr), "₹5.00");
    }

    #[test]
    fn test_fmt_date() {
        assert_eq!(fmt_date(Some("2025-01-31T10:00:00")), "2025-01-31");
        assert_eq!(fmt_date(Some("today")), "today");
        assert_eq!(fmt_date(None), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Electricity bill", 8), "Electri…");
    }
}
