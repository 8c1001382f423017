use crate::endpoints::{
    RecordId,
    accounts::ListAccounts,
    budgets::{CreateBudget, DeleteBudget, ListBudgets, NewBudget},
    categories::{CreateCategory, DeleteCategory, ListCategories, UpdateCategory},
    transactions::{
        CreateTransaction, GetCategorySummary, ListAccountTransactions, ListTransactions,
        NewTransaction,
    },
};

#[derive(Default)]
pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListAccounts {
        ListAccounts::new()
    }
}

#[derive(Default)]
pub struct TransactionRepository;

impl TransactionRepository {
    pub fn new() -> Self {
        Self
    }

    /// All transactions across every account
    pub fn list(&self) -> ListTransactions {
        ListTransactions
    }

    pub fn for_account(&self, account_id: RecordId) -> ListAccountTransactions {
        ListAccountTransactions::new(account_id)
    }

    pub fn category_summary(&self) -> GetCategorySummary {
        GetCategorySummary
    }

    pub fn create(&self, transaction: NewTransaction) -> CreateTransaction {
        CreateTransaction::from_new(transaction)
    }
}

#[derive(Default)]
pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListCategories {
        ListCategories
    }

    pub fn create(&self, name: impl Into<String>) -> CreateCategory {
        CreateCategory::new(name)
    }

    pub fn update(&self, category_id: RecordId, name: impl Into<String>) -> UpdateCategory {
        UpdateCategory::new(category_id, name)
    }

    pub fn delete(&self, category_id: RecordId) -> DeleteCategory {
        DeleteCategory::new(category_id)
    }
}

#[derive(Default)]
pub struct BudgetRepository;

impl BudgetRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListBudgets {
        ListBudgets
    }

    pub fn create(&self, budget: NewBudget) -> CreateBudget {
        CreateBudget::new(budget)
    }

    pub fn delete(&self, budget_id: RecordId) -> DeleteBudget {
        DeleteBudget::new(budget_id)
    }
}
