use crate::background::{api::FinanceApi, data_loader::DataLoader, BackgroundTaskManager};
use crate::events::{AppCommand, DataRequest};
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::path::PathBuf;

const LOG_PAGE_SIZE: usize = 20;

/// Execute a command: apply its state transition, then spawn whatever
/// background work it requested
pub fn execute_command<A: FinanceApi>(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader<A>,
) {
    if let Some(request) = execute_command_sync(command, state) {
        spawn_request(request, task_manager, data_loader);
    }
}

pub fn spawn_request<A: FinanceApi>(
    request: DataRequest,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader<A>,
) {
    let task_id = request.task_id();
    tracing::debug!("Spawning task {}: {:?}", task_id, request);

    let data_loader = data_loader.clone();
    let future = async move {
        data_loader.run(request).await;
    };

    task_manager.spawn_load_task(task_id, future);
}

/// Synchronous state transition for a command.
///
/// Never touches the network: anything that needs the backend is returned as a
/// [`DataRequest`] for the caller to perform.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<DataRequest> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let request = apply(command, state);

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    request
}

fn apply(command: AppCommand, state: &mut AppState) -> Option<DataRequest> {
    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,
        AppCommand::DismissAlert => state.alert = None,

        AppCommand::SelectNext => match state.current_screen_mut() {
            Screen::Dashboard(s) => s.select_next(),
            Screen::Transactions(s) => s.select_next(),
            Screen::Categories(s) => s.select_next(),
            Screen::Budgets(s) => s.select_next(),
            // Logs screen uses its own scroll commands, not SelectNext
            Screen::Logs(_) => {}
        },

        AppCommand::SelectPrevious => match state.current_screen_mut() {
            Screen::Dashboard(s) => s.select_prev(),
            Screen::Transactions(s) => s.select_prev(),
            Screen::Categories(s) => s.select_prev(),
            Screen::Budgets(s) => s.select_prev(),
            Screen::Logs(_) => {}
        },

        AppCommand::NavigateToTop => match state.current_screen_mut() {
            Screen::Dashboard(s) => s.select_first(),
            Screen::Transactions(s) => s.select_first(),
            Screen::Categories(s) => s.select_first(),
            Screen::Budgets(s) => s.select_first(),
            Screen::Logs(s) => s.scroll_offset = s.total_entries.saturating_sub(1),
        },

        AppCommand::NavigateToBottom => match state.current_screen_mut() {
            Screen::Dashboard(s) => s.select_last(),
            Screen::Transactions(s) => s.select_last(),
            Screen::Categories(s) => s.select_last(),
            Screen::Budgets(s) => s.select_last(),
            Screen::Logs(s) => s.scroll_offset = 0,
        },

        AppCommand::NavigateBack => {
            state.navigate_back();
        }

        AppCommand::SwitchPage(page) => {
            state.switch_page(Screen::for_page(page, state.default_currency));
            return Some(mount_request(page));
        }

        AppCommand::NextPage => {
            let page = state.current_page().next();
            return apply(AppCommand::SwitchPage(page), state);
        }

        AppCommand::Refresh => return refresh(state),

        AppCommand::CycleCurrency => match state.current_screen_mut() {
            Screen::Dashboard(s) => s.currency = s.currency.next(),
            Screen::Transactions(s) => s.currency = s.currency.next(),
            _ => {}
        },

        AppCommand::SelectAdjacentAccount { forward } => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                let account_id = s.adjacent_account_id(forward)?;
                tracing::debug!("Selecting account {}", account_id);
                s.selected_account_id = Some(account_id);
                s.transactions.clear();
                s.transactions_loading = LoadingState::loading();
                s.table_state = RefCell::new(TableState::default());
                return Some(DataRequest::LoadTransactions { account_id });
            }
        }

        AppCommand::EnterTransactionForm => {
            let Screen::Transactions(s) = state.current_screen_mut() else {
                return None;
            };
            let Some(account_id) = s.selected_account_id else {
                state.notifications.notify("Select an account first");
                return None;
            };
            s.form = Some(TransactionFormState::new(account_id));
            s.input_mode = InputMode::TransactionForm;
        }

        AppCommand::EnterCsvImport => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.csv_path.clear();
                s.input_mode = InputMode::CsvImport;
            }
        }

        AppCommand::NavigateFormField { forward } => match state.current_screen_mut() {
            Screen::Transactions(s) => {
                if let Some(ref mut form) = s.form {
                    form.current_field = cycle(form.current_field, forward);
                }
            }
            Screen::Categories(s) => {
                if let Some(ref mut form) = s.form {
                    form.current_field = cycle(form.current_field, forward);
                }
            }
            Screen::Budgets(s) => {
                if let Some(ref mut form) = s.form {
                    form.current_field = cycle(form.current_field, forward);
                }
            }
            _ => {}
        },

        AppCommand::AppendFormChar(c) => edit_form(state, |text| text.push(c), Some(c)),

        AppCommand::DeleteFormChar => edit_form(
            state,
            |text| {
                text.pop();
            },
            None,
        ),

        AppCommand::SubmitForm => return submit_form(state),

        AppCommand::CancelForm => match state.current_screen_mut() {
            Screen::Transactions(s) => {
                s.form = None;
                s.csv_path.clear();
                s.input_mode = InputMode::Normal;
            }
            Screen::Categories(s) => {
                s.form = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Budgets(s) => {
                s.form = None;
                s.input_mode = InputMode::Normal;
            }
            _ => {}
        },

        AppCommand::EnterCategoryCreate => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.form = Some(CategoryFormState::new());
                s.input_mode = InputMode::CategoryForm;
            }
        }

        AppCommand::EnterCategoryEdit { category_id } => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                if let Some(category) = s.categories.iter().find(|c| c.id == category_id) {
                    s.form = Some(CategoryFormState::from_category(category));
                    s.input_mode = InputMode::CategoryForm;
                } else {
                    tracing::warn!("Cannot edit unknown category {}", category_id);
                }
            }
        }

        AppCommand::InitiateCategoryDelete { category_id } => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.delete_confirmation_id = Some(category_id);
                s.input_mode = InputMode::DeleteConfirmation;
            }
        }

        AppCommand::ConfirmCategoryDelete => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Normal;
                let category_id = s.delete_confirmation_id.take()?;
                return Some(DataRequest::DeleteCategory { category_id });
            }
        }

        AppCommand::CancelCategoryDelete => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.delete_confirmation_id = None;
                s.input_mode = InputMode::Normal;
            }
        }

        AppCommand::EnterBudgetForm => {
            if let Screen::Budgets(s) = state.current_screen_mut() {
                s.form = Some(BudgetFormState::for_current_month());
                s.input_mode = InputMode::BudgetForm;
            }
        }

        AppCommand::DeleteBudget { budget_id } => {
            if let Screen::Budgets(_) = state.current_screen() {
                return Some(DataRequest::DeleteBudget { budget_id });
            }
        }

        // Filter mode
        AppCommand::EnterFilterMode => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Filter;
            }
        }
        AppCommand::ExitFilterMode => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Normal;
            }
        }
        AppCommand::AppendFilterChar(c) => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.filter_query.push(c);
                s.table_state.borrow_mut().select(Some(0));
                s.clamp_selection();
            }
        }
        AppCommand::DeleteFilterChar => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.filter_query.pop();
                s.clamp_selection();
            }
        }
        AppCommand::ClearFilter => {
            if let Screen::Transactions(s) = state.current_screen_mut() {
                s.filter_query.clear();
                s.clamp_selection();
            }
        }

        // Log screen
        AppCommand::NavigateToLogs => {
            if !matches!(state.current_screen(), Screen::Logs(_)) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset =
                    (s.scroll_offset + LOG_PAGE_SIZE).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
        }
    }

    None
}

/// Data a freshly mounted page fetches
fn mount_request(page: Page) -> DataRequest {
    match page {
        Page::Dashboard => DataRequest::LoadDashboard,
        Page::Transactions => DataRequest::LoadTransactionsPage {
            preferred_account_id: None,
        },
        Page::Categories => DataRequest::LoadCategories,
        Page::Budgets => DataRequest::LoadBudgets,
    }
}

fn refresh(state: &mut AppState) -> Option<DataRequest> {
    match state.page_screen_mut() {
        Screen::Dashboard(s) => {
            s.dashboard_loading = LoadingState::loading();
            Some(DataRequest::LoadDashboard)
        }
        Screen::Transactions(s) => {
            s.transactions_loading = LoadingState::loading();
            Some(DataRequest::LoadTransactionsPage {
                preferred_account_id: s.selected_account_id,
            })
        }
        Screen::Categories(s) => {
            s.categories_loading = LoadingState::loading();
            Some(DataRequest::LoadCategories)
        }
        Screen::Budgets(s) => {
            s.budgets_loading = LoadingState::loading();
            Some(DataRequest::LoadBudgets)
        }
        Screen::Logs(_) => None,
    }
}

fn cycle<F: FormField>(field: F, forward: bool) -> F {
    if forward { field.next() } else { field.prev() }
}

/// Apply a text edit to the focused field of whichever form is open.
/// `typed` is the character entered, used by the credit/debit selector.
fn edit_form(state: &mut AppState, edit: impl FnOnce(&mut String), typed: Option<char>) {
    match state.current_screen_mut() {
        Screen::Transactions(s) => match s.input_mode {
            InputMode::CsvImport => edit(&mut s.csv_path),
            InputMode::TransactionForm => {
                if let Some(ref mut form) = s.form {
                    form.validation_error = None;
                    match form.field_mut() {
                        Some(text) => edit(text),
                        None => {
                            if typed.is_some() {
                                form.txn_type = form.txn_type.toggled();
                            }
                        }
                    }
                }
            }
            _ => {}
        },
        Screen::Categories(s) => {
            if let Some(ref mut form) = s.form {
                form.validation_error = None;
                edit(form.field_mut());
            }
        }
        Screen::Budgets(s) => {
            if let Some(ref mut form) = s.form {
                form.validation_error = None;
                edit(form.field_mut());
            }
        }
        Screen::Dashboard(_) | Screen::Logs(_) => {}
    }
}

fn submit_form(state: &mut AppState) -> Option<DataRequest> {
    match state.current_screen_mut() {
        Screen::Transactions(s) => match s.input_mode {
            InputMode::TransactionForm => {
                let form = s.form.as_mut()?;
                if form.submitting {
                    return None;
                }
                match validators::validate_transaction_form(form) {
                    Ok(transaction) => {
                        form.submitting = true;
                        Some(DataRequest::CreateTransaction { transaction })
                    }
                    Err(e) => {
                        form.validation_error = Some(e.to_string());
                        state.show_alert("Invalid transaction", e.to_string());
                        None
                    }
                }
            }
            InputMode::CsvImport => {
                let path = s.csv_path.trim().to_string();
                if path.is_empty() {
                    state.show_alert("No file selected", "Enter the path of a CSV file to upload");
                    return None;
                }
                tracing::info!("Uploading {}", path);
                let account_id = s.selected_account_id;
                s.csv_path.clear();
                s.input_mode = InputMode::Normal;
                Some(DataRequest::ImportCsv {
                    account_id,
                    path: PathBuf::from(path),
                })
            }
            _ => None,
        },
        Screen::Categories(s) => {
            let form = s.form.as_mut()?;
            if form.submitting {
                return None;
            }
            match validators::validate_category_form(form) {
                Ok(category) => {
                    form.submitting = true;
                    Some(DataRequest::SaveCategory {
                        category_id: form.editing_id,
                        category,
                    })
                }
                Err(e) => {
                    form.validation_error = Some(e.to_string());
                    state.show_alert("Invalid category", e.to_string());
                    None
                }
            }
        }
        Screen::Budgets(s) => {
            let form = s.form.as_mut()?;
            match validators::validate_budget_form(form) {
                Ok(budget) => {
                    s.form = None;
                    s.input_mode = InputMode::Normal;
                    Some(DataRequest::CreateBudget { budget })
                }
                Err(e) => {
                    form.validation_error = Some(e.to_string());
                    state.show_alert("Invalid budget", e.to_string());
                    None
                }
            }
        }
        Screen::Dashboard(_) | Screen::Logs(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use finboard_api::endpoints::{
        accounts::Account,
        categories::{Category, SaveCategory},
        transactions::TxnType,
        RecordId,
    };

    fn account(id: RecordId) -> Account {
        Account {
            id,
            bank_name: format!("Bank {id}"),
            account_type: "current".to_string(),
            balance: 0.0,
        }
    }

    fn transactions_state(selected: Option<RecordId>) -> AppState {
        let mut state = AppState::new();
        state.history = vec![Screen::Transactions(Box::new(TransactionsState {
            accounts: vec![account(1), account(2)],
            selected_account_id: selected,
            transactions_loading: LoadingState::Loaded,
            ..Default::default()
        }))];
        state
    }

    fn categories_state() -> AppState {
        let mut state = AppState::new();
        state.history = vec![Screen::Categories(CategoriesState {
            categories: vec![Category {
                id: 4,
                name: "Travel".to_string(),
                keywords: Some("uber,ola".to_string()),
            }],
            categories_loading: LoadingState::Loaded,
            ..Default::default()
        })];
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            execute_command_sync(AppCommand::AppendFormChar(c), state);
        }
    }

    #[test]
    fn test_switch_page_mounts_with_request() {
        let mut state = AppState::new();
        state.notifications.notify("old toast");

        let request = execute_command_sync(AppCommand::SwitchPage(Page::Budgets), &mut state);

        assert_eq!(request, Some(DataRequest::LoadBudgets));
        assert!(state.notifications.is_empty());
        let Screen::Budgets(s) = state.current_screen() else {
            panic!("Expected Budgets screen");
        };
        assert!(s.budgets_loading.is_loading());
    }

    #[test]
    fn test_refresh_transactions_keeps_account() {
        let mut state = transactions_state(Some(2));
        let request = execute_command_sync(AppCommand::Refresh, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::LoadTransactionsPage {
                preferred_account_id: Some(2)
            })
        );
    }

    #[test]
    fn test_select_adjacent_account_loads_transactions() {
        let mut state = transactions_state(Some(1));

        let request =
            execute_command_sync(AppCommand::SelectAdjacentAccount { forward: true }, &mut state);
        assert_eq!(request, Some(DataRequest::LoadTransactions { account_id: 2 }));

        // Already at the last account
        let request =
            execute_command_sync(AppCommand::SelectAdjacentAccount { forward: true }, &mut state);
        assert_eq!(request, None);
    }

    #[test]
    fn test_cycle_currency() {
        let mut state = transactions_state(Some(1));
        execute_command_sync(AppCommand::CycleCurrency, &mut state);
        let Screen::Transactions(s) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert_eq!(s.currency, Currency::Usd);
    }

    #[test]
    fn test_transaction_form_submit() {
        let mut state = transactions_state(Some(1));
        execute_command_sync(AppCommand::EnterTransactionForm, &mut state);
        type_text(&mut state, "Groceries");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        type_text(&mut state, "450");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        // Any key on the type selector toggles credit/debit
        type_text(&mut state, " ");

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        let Some(DataRequest::CreateTransaction { transaction }) = request else {
            panic!("Expected CreateTransaction, got {:?}", request);
        };
        assert_eq!(transaction.account_id, 1);
        assert_eq!(transaction.description, "Groceries");
        assert_eq!(transaction.amount, 450.0);
        assert_eq!(transaction.txn_type, TxnType::Debit);

        // Second submit while in flight is ignored
        assert_eq!(execute_command_sync(AppCommand::SubmitForm, &mut state), None);
    }

    #[test]
    fn test_transaction_form_invalid_makes_no_request() {
        let mut state = transactions_state(Some(1));
        execute_command_sync(AppCommand::EnterTransactionForm, &mut state);

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        assert_eq!(request, None);

        let Screen::Transactions(s) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        let form = s.form.as_ref().expect("form stays open");
        assert_eq!(
            form.validation_error.as_deref(),
            Some("Description is required")
        );
        assert_eq!(
            state.alert.as_ref().map(|a| a.title.as_str()),
            Some("Invalid transaction")
        );
    }

    #[test]
    fn test_transaction_form_needs_account() {
        let mut state = transactions_state(None);
        execute_command_sync(AppCommand::EnterTransactionForm, &mut state);
        let Screen::Transactions(s) = state.current_screen() else {
            panic!("Expected Transactions screen");
        };
        assert!(s.form.is_none());
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn test_csv_import_submit() {
        let mut state = transactions_state(Some(2));
        execute_command_sync(AppCommand::EnterCsvImport, &mut state);
        type_text(&mut state, "/tmp/statement.csv");

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::ImportCsv {
                account_id: Some(2),
                path: PathBuf::from("/tmp/statement.csv"),
            })
        );
    }

    #[test]
    fn test_csv_import_without_path_alerts() {
        let mut state = transactions_state(Some(2));
        execute_command_sync(AppCommand::EnterCsvImport, &mut state);

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        assert_eq!(request, None);
        assert!(state.alert.is_some());
    }

    #[test]
    fn test_category_edit_submit_updates() {
        let mut state = categories_state();
        execute_command_sync(AppCommand::EnterCategoryEdit { category_id: 4 }, &mut state);
        type_text(&mut state, " & Commute");

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::SaveCategory {
                category_id: Some(4),
                category: SaveCategory {
                    name: "Travel & Commute".to_string(),
                    keywords: "uber,ola".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_category_delete_cancel_makes_no_request() {
        let mut state = categories_state();
        execute_command_sync(AppCommand::InitiateCategoryDelete { category_id: 4 }, &mut state);
        let request = execute_command_sync(AppCommand::CancelCategoryDelete, &mut state);

        assert_eq!(request, None);
        let Screen::Categories(s) = state.current_screen() else {
            panic!("Expected Categories screen");
        };
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.categories.len(), 1);
    }

    #[test]
    fn test_category_delete_confirm_requests_delete() {
        let mut state = categories_state();
        execute_command_sync(AppCommand::InitiateCategoryDelete { category_id: 4 }, &mut state);
        let request = execute_command_sync(AppCommand::ConfirmCategoryDelete, &mut state);
        assert_eq!(request, Some(DataRequest::DeleteCategory { category_id: 4 }));

        // Confirmation is consumed
        let request = execute_command_sync(AppCommand::ConfirmCategoryDelete, &mut state);
        assert_eq!(request, None);
    }

    #[test]
    fn test_budget_form_submit_closes_form() {
        let mut state = AppState::new();
        state.history = vec![Screen::Budgets(BudgetsState::default())];
        execute_command_sync(AppCommand::EnterBudgetForm, &mut state);
        type_text(&mut state, "Food");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        type_text(&mut state, "3000");

        let request = execute_command_sync(AppCommand::SubmitForm, &mut state);
        let Some(DataRequest::CreateBudget { budget }) = request else {
            panic!("Expected CreateBudget, got {:?}", request);
        };
        assert_eq!(budget.category, "Food");
        assert_eq!(budget.limit_amount, 3000.0);

        let Screen::Budgets(s) = state.current_screen() else {
            panic!("Expected Budgets screen");
        };
        assert!(s.form.is_none());
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_pending_key_cleared_after_command() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::SetPendingKey('g'), &mut state);
        assert_eq!(state.pending_key, Some('g'));
        execute_command_sync(AppCommand::NavigateToTop, &mut state);
        assert_eq!(state.pending_key, None);
    }

    #[test]
    fn test_dismiss_alert() {
        let mut state = AppState::new();
        state.show_alert("Failed", "boom");
        execute_command_sync(AppCommand::DismissAlert, &mut state);
        assert!(state.alert.is_none());
    }
}
