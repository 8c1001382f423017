use std::path::PathBuf;

use finboard_api::endpoints::{
    RecordId,
    accounts::Account,
    budgets::{Budget, NewBudget},
    categories::{Category, SaveCategory},
    transactions::{CategorySummaryRow, NewTransaction, Transaction},
};

use crate::state::Page;

/// Commands to execute (user actions → state changes and background requests)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,
    SwitchPage(Page),
    NextPage,
    Refresh,

    // Display
    CycleCurrency,
    DismissAlert,

    // Transactions page
    SelectAdjacentAccount {
        forward: bool,
    },
    EnterTransactionForm,
    EnterCsvImport,

    // Shared by every form and the CSV path prompt
    NavigateFormField {
        forward: bool,
    },
    AppendFormChar(char),
    DeleteFormChar,
    SubmitForm,
    CancelForm,

    // Categories page
    EnterCategoryCreate,
    EnterCategoryEdit {
        category_id: RecordId,
    },
    InitiateCategoryDelete {
        category_id: RecordId,
    },
    ConfirmCategoryDelete,
    CancelCategoryDelete,

    // Budgets page
    EnterBudgetForm,
    DeleteBudget {
        budget_id: RecordId,
    },

    // Filter mode
    EnterFilterMode,
    ExitFilterMode,
    AppendFilterChar(char),
    DeleteFilterChar,
    ClearFilter,

    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Side effects requested by a command, performed by the data loader
#[derive(Debug, Clone, PartialEq)]
pub enum DataRequest {
    LoadDashboard,
    /// Accounts first, then the transactions of the preferred account (or the
    /// first account when the preferred one no longer exists)
    LoadTransactionsPage {
        preferred_account_id: Option<RecordId>,
    },
    LoadTransactions {
        account_id: RecordId,
    },
    LoadCategories,
    LoadBudgets,
    CreateTransaction {
        transaction: NewTransaction,
    },
    ImportCsv {
        account_id: Option<RecordId>,
        path: PathBuf,
    },
    SaveCategory {
        category_id: Option<RecordId>,
        category: SaveCategory,
    },
    DeleteCategory {
        category_id: RecordId,
    },
    CreateBudget {
        budget: NewBudget,
    },
    DeleteBudget {
        budget_id: RecordId,
    },
}

impl DataRequest {
    /// Background task key. Spawning a task with a key that is still running
    /// aborts the older one, so every transaction list load shares one key.
    pub fn task_id(&self) -> String {
        match self {
            Self::LoadDashboard => "load_dashboard".to_string(),
            Self::LoadTransactionsPage { .. } | Self::LoadTransactions { .. } => {
                "load_transactions".to_string()
            }
            Self::LoadCategories => "load_categories".to_string(),
            Self::LoadBudgets => "load_budgets".to_string(),
            Self::CreateTransaction { .. } => "create_transaction".to_string(),
            Self::ImportCsv { .. } => "import_csv".to_string(),
            Self::SaveCategory { .. } => "save_category".to_string(),
            Self::DeleteCategory { category_id } => format!("delete_category_{}", category_id),
            Self::CreateBudget { .. } => "create_budget".to_string(),
            Self::DeleteBudget { budget_id } => format!("delete_budget_{}", budget_id),
        }
    }
}

/// Events from background tasks (responses to requests)
#[derive(Debug, Clone)]
pub enum DataEvent {
    DashboardLoaded {
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        category_summary: Vec<CategorySummaryRow>,
    },
    AccountsLoaded {
        accounts: Vec<Account>,
    },
    /// Tagged with the account it was fetched for so a late response for a
    /// previously selected account can be discarded
    TransactionsLoaded {
        account_id: RecordId,
        transactions: Vec<Transaction>,
    },
    CategoriesLoaded {
        categories: Vec<Category>,
    },
    BudgetsLoaded {
        budgets: Vec<Budget>,
    },

    // Transaction creation
    TransactionCreated,
    TransactionCreateFailed {
        error: String,
    },

    // CSV import
    CsvImported {
        file_name: String,
    },
    CsvImportFailed {
        error: String,
    },

    // Category mutations
    CategorySaved {
        created: bool,
    },
    CategorySaveFailed {
        error: String,
    },
    CategoryDeleted {
        category_id: RecordId,
    },
    CategoryDeleteFailed {
        category_id: RecordId,
        error: String,
    },

    // Budget mutations
    BudgetCreated,
    BudgetCreateFailed {
        error: String,
    },
    BudgetDeleted {
        budget_id: RecordId,
    },
    BudgetDeleteFailed {
        budget_id: RecordId,
        error: String,
    },

    // Errors
    /// A page load failed; tagged with the page that issued it
    LoadError {
        page: Page,
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_loads_share_task_id() {
        let page = DataRequest::LoadTransactionsPage {
            preferred_account_id: Some(1),
        };
        let first = DataRequest::LoadTransactions { account_id: 1 };
        let second = DataRequest::LoadTransactions { account_id: 2 };
        assert_eq!(first.task_id(), second.task_id());
        assert_eq!(page.task_id(), first.task_id());
    }

    #[test]
    fn test_deletes_are_keyed_by_record() {
        assert_ne!(
            DataRequest::DeleteCategory { category_id: 1 }.task_id(),
            DataRequest::DeleteCategory { category_id: 2 }.task_id()
        );
        assert_eq!(
            DataRequest::DeleteBudget { budget_id: 7 }.task_id(),
            "delete_budget_7"
        );
    }
}
