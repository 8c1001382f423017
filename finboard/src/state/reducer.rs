use super::{pick_account, AppState, InputMode, LoadingState, Page, Scrollable};
use crate::currency::Currency;
use crate::events::DataEvent;
use crate::summary;
use crate::ui::screens::Screen;
use finboard_api::endpoints::transactions::{Transaction, TxnType};
use ratatui::widgets::TableState;
use std::cell::RefCell;

/// Pure state transition function for data events.
///
/// Page data lands on the mounted page (the root of the stack), so responses
/// that arrive while the log screen is open are not lost. Responses for a page
/// that is no longer mounted are dropped.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::DashboardLoaded {
            accounts,
            transactions,
            category_summary,
        } => {
            let currency = match state.page_screen_mut() {
                Screen::Dashboard(dashboard_state) => dashboard_state.currency,
                _ => return,
            };

            announce_new_transactions(state, &transactions, currency);

            if let Screen::Dashboard(dashboard_state) = state.page_screen_mut() {
                dashboard_state.summary = Some(summary::compute_summary(&accounts, &transactions));
                dashboard_state.category_breakdown =
                    summary::compute_category_breakdown(&category_summary);
                dashboard_state.accounts = accounts;
                dashboard_state.transactions = transactions;
                dashboard_state.dashboard_loading = LoadingState::Loaded;
                dashboard_state.clamp_selection();
            }
        }

        DataEvent::AccountsLoaded { accounts } => {
            if let Screen::Transactions(transactions_state) = state.page_screen_mut() {
                let selected = pick_account(&accounts, transactions_state.selected_account_id);
                if selected != transactions_state.selected_account_id {
                    transactions_state.transactions.clear();
                }
                transactions_state.selected_account_id = selected;
                transactions_state.accounts = accounts;

                if selected.is_none() {
                    // Nothing further will be fetched
                    transactions_state.transactions.clear();
                    transactions_state.transactions_loading = LoadingState::Loaded;
                }
            }
        }

        DataEvent::TransactionsLoaded {
            account_id,
            transactions,
        } => {
            if let Screen::Transactions(transactions_state) = state.page_screen_mut() {
                if transactions_state.selected_account_id != Some(account_id) {
                    tracing::debug!(
                        "Discarding transactions for account {}, selected is {:?}",
                        account_id,
                        transactions_state.selected_account_id
                    );
                    return;
                }
                transactions_state.transactions = transactions;
                transactions_state.transactions_loading = LoadingState::Loaded;
                transactions_state.clamp_selection();
            }
        }

        DataEvent::CategoriesLoaded { categories } => {
            if let Screen::Categories(categories_state) = state.page_screen_mut() {
                categories_state.categories = categories;
                categories_state.categories_loading = LoadingState::Loaded;
                categories_state.clamp_selection();
            }
        }

        DataEvent::BudgetsLoaded { budgets } => {
            if let Screen::Budgets(budgets_state) = state.page_screen_mut() {
                budgets_state.budgets = budgets;
                budgets_state.budgets_loading = LoadingState::Loaded;
                budgets_state.clamp_selection();
            }
        }

        DataEvent::TransactionCreated => {
            tracing::info!("Transaction created");
            if let Screen::Transactions(transactions_state) = state.page_screen_mut() {
                transactions_state.form = None;
                transactions_state.input_mode = InputMode::Normal;
                transactions_state.table_state =
                    RefCell::new(TableState::default().with_selected(0));
            }
            state.notifications.notify("Transaction added successfully");
        }

        DataEvent::TransactionCreateFailed { error } => {
            tracing::error!("Transaction creation failed: {}", error);
            if let Screen::Transactions(transactions_state) = state.page_screen_mut() {
                // Keep form open with the entered values
                if let Some(ref mut form) = transactions_state.form {
                    form.submitting = false;
                }
            }
            state.show_alert("Failed to add transaction", error);
        }

        DataEvent::CsvImported { file_name } => {
            tracing::info!("Imported {}", file_name);
            state.notifications.notify("CSV uploaded successfully");
        }

        DataEvent::CsvImportFailed { error } => {
            tracing::error!("CSV import failed: {}", error);
            state.show_alert("CSV upload failed", error);
        }

        DataEvent::CategorySaved { created } => {
            if let Screen::Categories(categories_state) = state.page_screen_mut() {
                categories_state.form = None;
                categories_state.input_mode = InputMode::Normal;
            }
            state.notifications.notify(if created {
                "Category created successfully"
            } else {
                "Category updated successfully"
            });
        }

        DataEvent::CategorySaveFailed { error } => {
            tracing::error!("Saving category failed: {}", error);
            if let Screen::Categories(categories_state) = state.page_screen_mut() {
                if let Some(ref mut form) = categories_state.form {
                    form.submitting = false;
                }
            }
            state.show_alert("Error saving category", error);
        }

        DataEvent::CategoryDeleted { category_id } => {
            tracing::info!("Category {} deleted", category_id);
            state.notifications.notify("Category deleted");
        }

        DataEvent::CategoryDeleteFailed { category_id, error } => {
            tracing::error!("Failed to delete category {}: {}", category_id, error);
            state.show_alert("Error deleting category", error);
        }

        DataEvent::BudgetCreated => {
            state.notifications.notify("Budget added");
        }

        DataEvent::BudgetCreateFailed { error } => {
            tracing::error!("Budget creation failed: {}", error);
            state.show_alert("Failed to add budget", error);
        }

        DataEvent::BudgetDeleted { budget_id } => {
            tracing::info!("Budget {} deleted", budget_id);
            state.notifications.notify("Budget deleted");
        }

        DataEvent::BudgetDeleteFailed { budget_id, error } => {
            tracing::error!("Failed to delete budget {}: {}", budget_id, error);
            state.show_alert("Failed to delete budget", error);
        }

        DataEvent::LoadError { page, error } => {
            if state.current_page() != page {
                tracing::debug!("Discarding load error for {:?}: {}", page, error);
                return;
            }
            tracing::error!("Load error: {}", error);
            let loading = match state.page_screen_mut() {
                Screen::Dashboard(s) => Some(&mut s.dashboard_loading),
                Screen::Transactions(s) => Some(&mut s.transactions_loading),
                Screen::Categories(s) => Some(&mut s.categories_loading),
                Screen::Budgets(s) => Some(&mut s.budgets_loading),
                Screen::Logs(_) => None,
            };
            if let Some(loading) = loading {
                *loading = LoadingState::Error(error.clone());
            }
            state.show_alert("Failed to load data", error);
        }
    }
}

/// Toast every transaction the dashboard has not announced before
fn announce_new_transactions(state: &mut AppState, transactions: &[Transaction], currency: Currency) {
    for txn in transactions {
        if state.seen_transaction_ids.insert(txn.id) {
            state.notifications.notify(transaction_toast(txn, currency));
        }
    }
}

pub fn transaction_toast(txn: &Transaction, currency: Currency) -> String {
    let verb = match txn.txn_type {
        TxnType::Credit => "Credited",
        TxnType::Debit => "Debited",
        TxnType::Other => "Transaction",
    };
    format!("{} {}", verb, currency.format(Some(txn.amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BudgetsState, CategoriesState, CategoryFormState, DashboardState, LogsState,
        TransactionFormState, TransactionsState,
    };
    use finboard_api::endpoints::{
        accounts::Account,
        budgets::Budget,
        categories::Category,
        transactions::CategorySummaryRow,
        RecordId,
    };

    // ============================================================================
    // Helper Functions
    // ============================================================================

    fn create_test_account(id: RecordId, bank_name: &str, balance: f64) -> Account {
        Account {
            id,
            bank_name: bank_name.to_string(),
            account_type: "savings".to_string(),
            balance,
        }
    }

    fn create_test_transaction(
        id: RecordId,
        account_id: RecordId,
        amount: f64,
        txn_type: TxnType,
    ) -> Transaction {
        Transaction {
            id,
            account_id,
            description: Some(format!("Transaction {}", id)),
            amount,
            txn_type,
            date: Some("2025-01-10".to_string()),
            category: None,
        }
    }

    fn transactions_screen(selected_account_id: Option<RecordId>) -> Screen {
        Screen::Transactions(Box::new(TransactionsState {
            accounts: vec![
                create_test_account(1, "HDFC", 100.0),
                create_test_account(2, "SBI", 200.0),
            ],
            selected_account_id,
            transactions_loading: LoadingState::loading(),
            ..Default::default()
        }))
    }

    fn loading_dashboard() -> Screen {
        Screen::Dashboard(DashboardState {
            dashboard_loading: LoadingState::loading(),
            ..Default::default()
        })
    }

    // ============================================================================
    // Dashboard
    // ============================================================================

    #[test]
    fn test_dashboard_loaded_computes_summary() {
        let mut state = AppState::new();
        state.history = vec![loading_dashboard()];

        reduce_data_event(
            &mut state,
            DataEvent::DashboardLoaded {
                accounts: vec![
                    create_test_account(1, "HDFC", 1000.0),
                    create_test_account(2, "SBI", 500.0),
                ],
                transactions: vec![
                    create_test_transaction(1, 1, 300.0, TxnType::Credit),
                    create_test_transaction(2, 1, 120.0, TxnType::Debit),
                ],
                category_summary: vec![CategorySummaryRow {
                    category: None,
                    total: 120.0,
                }],
            },
        );

        let Screen::Dashboard(dashboard_state) = state.current_screen() else {
            panic!("Expected Dashboard screen");
        };
        assert_eq!(dashboard_state.dashboard_loading, LoadingState::Loaded);
        let summary = dashboard_state.summary.expect("summary computed");
        assert_eq!(summary.balance, 1500.0);
        assert_eq!(summary.account_count, 2);
        assert_eq!(summary.income, 300.0);
        assert_eq!(summary.expenses, 120.0);
        assert_eq!(dashboard_state.category_breakdown[0].name, "Others");
        assert_eq!(dashboard_state.table_state.borrow().selected(), Some(0));
    }

    #[test]
    fn test_dashboard_toasts_each_new_transaction_once() {
        let mut state = AppState::new();
        state.history = vec![loading_dashboard()];

        let first = vec![
            create_test_transaction(1, 1, 250.0, TxnType::Credit),
            create_test_transaction(2, 1, 40.0, TxnType::Debit),
        ];
        reduce_data_event(
            &mut state,
            DataEvent::DashboardLoaded {
                accounts: vec![],
                transactions: first.clone(),
                category_summary: vec![],
            },
        );

        let messages: Vec<_> = state.notifications.iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages, vec!["Credited ₹250.00", "Debited ₹40.00"]);

        let mut second = first;
        second.push(create_test_transaction(3, 1, 10.0, TxnType::Debit));
        reduce_data_event(
            &mut state,
            DataEvent::DashboardLoaded {
                accounts: vec![],
                transactions: second,
                category_summary: vec![],
            },
        );

        assert_eq!(state.notifications.len(), 3);
        assert_eq!(
            state.notifications.iter().last().map(|n| n.message.as_str()),
            Some("Debited ₹10.00")
        );
    }

    #[test]
    fn test_dashboard_event_ignored_on_other_page() {
        let mut state = AppState::new();
        state.history = vec![Screen::Budgets(BudgetsState::default())];

        reduce_data_event(
            &mut state,
            DataEvent::DashboardLoaded {
                accounts: vec![],
                transactions: vec![create_test_transaction(1, 1, 5.0, TxnType::Credit)],
                category_summary: vec![],
            },
        );

        assert!(state.notifications.is_empty());
        assert!(state.seen_transaction_ids.is_empty());
    }

    #[test]
    fn test_data_lands_on_page_below_logs() {
        let mut state = AppState::new();
        state.history = vec![
            Screen::Categories(CategoriesState {
                categories_loading: LoadingState::loading(),
                ..Default::default()
            }),
            Screen::Logs(LogsState::default()),
        ];

        reduce_data_event(
            &mut state,
            DataEvent::CategoriesLoaded {
                categories: vec![Category {
                    id: 1,
                    name: "Food".to_string(),
                    keywords: None,
                }],
            },
        );

        let Screen::Categories(categories_state) = &state.history[0] else {
            panic!("Expected Categories screen");
        };
        assert_eq!(categories_state.categories.len(), 1);
        assert_eq!(categories_state.categories_loading, LoadingState::Loaded);
    }

    // ============================================================================
    // Transactions
    // ============================================================================

    #[test]
    fn test_accounts_loaded_selects_first_account() {
        let mut state = AppState::new();
        state.history = vec![transactions_screen(None)];

        reduce_data_event(
            &mut state,
            DataEvent::AccountsLoaded {
                accounts: vec![
                    create_test_account(5, "ICICI", 0.0),
                    create_test_account(6, "Axis", 0.0),
                ],
            },
        );

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(transactions_state.selected_account_id, Some(5));
        assert!(transactions_state.transactions_loading.is_loading());
    }

    #[test]
    fn test_accounts_loaded_without_accounts_finishes_loading() {
        let mut state = AppState::new();
        state.history = vec![transactions_screen(None)];

        reduce_data_event(&mut state, DataEvent::AccountsLoaded { accounts: vec![] });

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(transactions_state.selected_account_id, None);
        assert_eq!(transactions_state.transactions_loading, LoadingState::Loaded);
    }

    #[test]
    fn test_transactions_loaded_for_selected_account() {
        let mut state = AppState::new();
        state.history = vec![transactions_screen(Some(2))];

        reduce_data_event(
            &mut state,
            DataEvent::TransactionsLoaded {
                account_id: 2,
                transactions: vec![create_test_transaction(9, 2, 75.0, TxnType::Debit)],
            },
        );

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(transactions_state.transactions.len(), 1);
        assert_eq!(transactions_state.transactions_loading, LoadingState::Loaded);
    }

    #[test]
    fn test_stale_transactions_are_discarded() {
        let mut state = AppState::new();
        state.history = vec![transactions_screen(Some(2))];

        // Response for the previously selected account arrives late
        reduce_data_event(
            &mut state,
            DataEvent::TransactionsLoaded {
                account_id: 1,
                transactions: vec![create_test_transaction(1, 1, 10.0, TxnType::Credit)],
            },
        );

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert!(transactions_state.transactions.is_empty());
        assert!(transactions_state.transactions_loading.is_loading());
    }

    #[test]
    fn test_transaction_created_closes_form() {
        let mut state = AppState::new();
        let mut screen = transactions_screen(Some(1));
        if let Screen::Transactions(ref mut s) = screen {
            s.input_mode = InputMode::TransactionForm;
            s.form = Some(TransactionFormState {
                submitting: true,
                ..TransactionFormState::new(1)
            });
        }
        state.history = vec![screen];

        reduce_data_event(&mut state, DataEvent::TransactionCreated);

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(transactions_state.input_mode, InputMode::Normal);
        assert!(transactions_state.form.is_none());
        assert_eq!(state.notifications.len(), 1);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_transaction_create_failed_keeps_form() {
        let mut state = AppState::new();
        let mut screen = transactions_screen(Some(1));
        if let Screen::Transactions(ref mut s) = screen {
            s.input_mode = InputMode::TransactionForm;
            s.form = Some(TransactionFormState {
                description: "Rent".to_string(),
                submitting: true,
                ..TransactionFormState::new(1)
            });
        }
        state.history = vec![screen];

        reduce_data_event(
            &mut state,
            DataEvent::TransactionCreateFailed {
                error: "(422) /transactions: amount required".to_string(),
            },
        );

        let Screen::Transactions(transactions_state) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(transactions_state.input_mode, InputMode::TransactionForm);
        let Some(ref form) = transactions_state.form else {
            panic!("Expected form to stay open");
        };
        assert_eq!(form.description, "Rent");
        assert!(!form.submitting);
        let alert = state.alert.as_ref().expect("alert shown");
        assert_eq!(alert.title, "Failed to add transaction");
    }

    // ============================================================================
    // Categories and budgets
    // ============================================================================

    #[test]
    fn test_category_saved_closes_form() {
        let mut state = AppState::new();
        state.history = vec![Screen::Categories(CategoriesState {
            input_mode: InputMode::CategoryForm,
            form: Some(CategoryFormState {
                editing_id: Some(4),
                ..CategoryFormState::new()
            }),
            ..Default::default()
        })];

        reduce_data_event(&mut state, DataEvent::CategorySaved { created: false });

        let Screen::Categories(categories_state) = state.current_screen() else {
            panic!("Expected Categories screen");
        };
        assert!(categories_state.form.is_none());
        assert_eq!(categories_state.input_mode, InputMode::Normal);
        assert_eq!(
            state.notifications.iter().next().map(|n| n.message.as_str()),
            Some("Category updated successfully")
        );
    }

    #[test]
    fn test_category_delete_failed_leaves_list() {
        let categories = vec![Category {
            id: 1,
            name: "Food".to_string(),
            keywords: None,
        }];
        let mut state = AppState::new();
        state.history = vec![Screen::Categories(CategoriesState {
            categories: categories.clone(),
            ..Default::default()
        })];

        reduce_data_event(
            &mut state,
            DataEvent::CategoryDeleteFailed {
                category_id: 1,
                error: "(500) /categories/1: boom".to_string(),
            },
        );

        let Screen::Categories(categories_state) = state.current_screen() else {
            panic!("Expected Categories screen");
        };
        assert_eq!(categories_state.categories, categories);
        assert!(state.alert.is_some());
    }

    #[test]
    fn test_budgets_loaded() {
        let mut state = AppState::new();
        state.history = vec![Screen::Budgets(BudgetsState {
            budgets_loading: LoadingState::loading(),
            ..Default::default()
        })];

        reduce_data_event(
            &mut state,
            DataEvent::BudgetsLoaded {
                budgets: vec![Budget {
                    id: 1,
                    category: "Food".to_string(),
                    limit_amount: 5000.0,
                    month: 1,
                    year: 2025,
                    spent_amount: Some(1200.0),
                    warning: None,
                }],
            },
        );

        let Screen::Budgets(budgets_state) = state.current_screen() else {
            panic!("Expected Budgets screen");
        };
        assert_eq!(budgets_state.budgets.len(), 1);
        assert_eq!(budgets_state.budgets_loading, LoadingState::Loaded);
        assert_eq!(budgets_state.selected_budget().map(|b| b.id), Some(1));
    }

    // ============================================================================
    // Error Handling Tests
    // ============================================================================

    #[test]
    fn test_load_error_on_budgets_screen() {
        let mut state = AppState::new();
        state.history = vec![Screen::Budgets(BudgetsState {
            budgets_loading: LoadingState::loading(),
            ..Default::default()
        })];

        reduce_data_event(
            &mut state,
            DataEvent::LoadError {
                page: Page::Budgets,
                error: "Network error on /budgets/: connection refused".to_string(),
            },
        );

        let Screen::Budgets(budgets_state) = state.current_screen() else {
            panic!("Expected Budgets screen");
        };
        match &budgets_state.budgets_loading {
            LoadingState::Error(msg) => {
                assert_eq!(msg, "Network error on /budgets/: connection refused")
            }
            _ => panic!("Expected Error loading state"),
        }
        assert_eq!(
            state.alert.as_ref().map(|a| a.title.as_str()),
            Some("Failed to load data")
        );
    }

    #[test]
    fn test_load_error_for_another_page_is_dropped() {
        let mut state = AppState::new();
        state.history = vec![Screen::Dashboard(DashboardState {
            summary: Some(summary::Summary::default()),
            dashboard_loading: LoadingState::Loaded,
            ..Default::default()
        })];

        // The categories page was left before its load failed
        reduce_data_event(
            &mut state,
            DataEvent::LoadError {
                page: Page::Categories,
                error: "(500) /categories/".to_string(),
            },
        );

        let Screen::Dashboard(dashboard_state) = state.current_screen() else {
            panic!("Expected Dashboard screen");
        };
        assert!(matches!(dashboard_state.dashboard_loading, LoadingState::Loaded));
        assert!(dashboard_state.summary.is_some());
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_load_error_lands_under_logs_overlay() {
        let mut state = AppState::new();
        state.history = vec![
            Screen::Categories(CategoriesState {
                categories_loading: LoadingState::loading(),
                ..Default::default()
            }),
            Screen::Logs(LogsState::default()),
        ];

        reduce_data_event(
            &mut state,
            DataEvent::LoadError {
                page: Page::Categories,
                error: "(500) /categories/".to_string(),
            },
        );

        let Screen::Categories(categories_state) = &state.history[0] else {
            panic!("Expected Categories screen at the root");
        };
        assert!(matches!(
            categories_state.categories_loading,
            LoadingState::Error(_)
        ));
        assert!(state.alert.is_some());
    }

    #[test]
    fn test_transaction_toast_text() {
        let txn = create_test_transaction(1, 1, 1000.0, TxnType::Other);
        assert_eq!(transaction_toast(&txn, Currency::Usd), "Transaction $12.00");
    }
}
