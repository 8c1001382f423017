//! Derived figures computed client-side from fetched lists.
//!
//! Nothing here is cached: pages recompute on every fetch.

use finboard_api::endpoints::{
    accounts::Account,
    transactions::{CategorySummaryRow, Transaction, TxnType},
};

/// Label used for spend the backend could not attribute to a category
pub const OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub balance: f64,
    pub account_count: usize,
    pub income: f64,
    pub expenses: f64,
}

impl Summary {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Balance over all accounts plus income/expense totals.
///
/// Transactions whose type is neither credit nor debit count toward neither sum.
pub fn compute_summary(accounts: &[Account], transactions: &[Transaction]) -> Summary {
    let balance = accounts.iter().map(|a| a.balance).sum();

    let (income, expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), t| match t.txn_type {
                TxnType::Credit => (income + t.amount, expenses),
                TxnType::Debit => (income, expenses + t.amount),
                TxnType::Other => (income, expenses),
            });

    Summary {
        balance,
        account_count: accounts.len(),
        income,
        expenses,
    }
}

/// Chart-ready slice of the spending distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
}

pub fn compute_category_breakdown(rows: &[CategorySummaryRow]) -> Vec<CategorySlice> {
    rows.iter()
        .map(|row| CategorySlice {
            name: row
                .category
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(OTHERS_LABEL)
                .to_string(),
            value: row.total,
        })
        .collect()
}

/// Fill ratio of a budget card's progress bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    /// Percent of the limit spent, clamped to `0..=100`
    pub percent: f64,
    pub over_limit: bool,
}

impl BudgetProgress {
    pub fn new(spent: f64, limit: f64) -> Self {
        let percent = if limit > 0.0 {
            (spent / limit * 100.0).clamp(0.0, 100.0)
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };

        Self {
            percent,
            over_limit: spent > limit,
        }
    }

    pub fn percent_u16(&self) -> u16 {
        self.percent.round() as u16
    }
}

/// Backend warnings mentioning an exceeded limit are shown as alerts
pub fn warning_is_alert(warning: &str) -> bool {
    warning.contains("exceeded")
}
