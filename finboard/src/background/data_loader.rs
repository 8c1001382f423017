use super::api::FinanceApi;
use crate::events::{DataEvent, DataRequest};
use crate::state::{pick_account, Page};
use finboard_api::endpoints::{
    RecordId,
    budgets::NewBudget,
    categories::SaveCategory,
    transactions::NewTransaction,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Performs [`DataRequest`]s against the backend and reports results as
/// [`DataEvent`]s. Every successful mutation is followed by a re-fetch of the
/// affected list; failures leave the list alone.
pub struct DataLoader<A> {
    pub api: Arc<A>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl<A> Clone for DataLoader<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            data_tx: self.data_tx.clone(),
        }
    }
}

impl<A: FinanceApi> DataLoader<A> {
    pub fn new(api: Arc<A>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { api, data_tx }
    }

    fn send(&self, event: DataEvent) {
        // Receiver is gone only during shutdown
        let _ = self.data_tx.send(event);
    }

    pub async fn run(&self, request: DataRequest) {
        match request {
            DataRequest::LoadDashboard => self.load_dashboard().await,
            DataRequest::LoadTransactionsPage {
                preferred_account_id,
            } => self.load_transactions_page(preferred_account_id).await,
            DataRequest::LoadTransactions { account_id } => {
                self.load_transactions(account_id).await
            }
            DataRequest::LoadCategories => self.load_categories().await,
            DataRequest::LoadBudgets => self.load_budgets().await,
            DataRequest::CreateTransaction { transaction } => {
                self.create_transaction(transaction).await
            }
            DataRequest::ImportCsv { account_id, path } => self.import_csv(account_id, path).await,
            DataRequest::SaveCategory {
                category_id,
                category,
            } => self.save_category(category_id, category).await,
            DataRequest::DeleteCategory { category_id } => {
                self.delete_category(category_id).await
            }
            DataRequest::CreateBudget { budget } => self.create_budget(budget).await,
            DataRequest::DeleteBudget { budget_id } => self.delete_budget(budget_id).await,
        }
    }

    /// Accounts, every transaction and the category summary, fetched concurrently
    pub async fn load_dashboard(&self) {
        tracing::info!("Loading dashboard");

        let (accounts, transactions, category_summary) = tokio::join!(
            self.api.list_accounts(),
            self.api.list_transactions(),
            self.api.category_summary(),
        );

        let (accounts, transactions) = match (accounts, transactions) {
            (Ok(accounts), Ok(transactions)) => (accounts, transactions),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Failed to load dashboard: {}", e);
                self.send(DataEvent::LoadError {
                    page: Page::Dashboard,
                    error: e.to_string(),
                });
                return;
            }
        };

        // The chart is secondary; an empty breakdown beats a failed page
        let category_summary = category_summary.unwrap_or_else(|e| {
            tracing::warn!("Category summary unavailable: {}", e);
            Vec::new()
        });

        tracing::info!(
            "Loaded {} accounts and {} transactions",
            accounts.len(),
            transactions.len()
        );
        self.send(DataEvent::DashboardLoaded {
            accounts,
            transactions,
            category_summary,
        });
    }

    /// Accounts, then the transactions of the account the page will select
    pub async fn load_transactions_page(&self, preferred_account_id: Option<RecordId>) {
        tracing::info!("Loading accounts");

        let accounts = match self.api.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::error!("Failed to load accounts: {}", e);
                self.send(DataEvent::LoadError {
                    page: Page::Transactions,
                    error: e.to_string(),
                });
                return;
            }
        };

        let selected = pick_account(&accounts, preferred_account_id);
        self.send(DataEvent::AccountsLoaded { accounts });

        if let Some(account_id) = selected {
            self.load_transactions(account_id).await;
        }
    }

    pub async fn load_transactions(&self, account_id: RecordId) {
        tracing::info!("Loading transactions for account {}", account_id);

        match self.api.list_account_transactions(account_id).await {
            Ok(transactions) => {
                tracing::debug!("Loaded {} transactions", transactions.len());
                self.send(DataEvent::TransactionsLoaded {
                    account_id,
                    transactions,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load transactions: {}", e);
                self.send(DataEvent::LoadError {
                    page: Page::Transactions,
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_categories(&self) {
        tracing::info!("Loading categories");

        match self.api.list_categories().await {
            Ok(categories) => self.send(DataEvent::CategoriesLoaded { categories }),
            Err(e) => {
                tracing::error!("Failed to load categories: {}", e);
                self.send(DataEvent::LoadError {
                    page: Page::Categories,
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_budgets(&self) {
        tracing::info!("Loading budgets");

        match self.api.list_budgets().await {
            Ok(budgets) => self.send(DataEvent::BudgetsLoaded { budgets }),
            Err(e) => {
                tracing::error!("Failed to load budgets: {}", e);
                self.send(DataEvent::LoadError {
                    page: Page::Budgets,
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn create_transaction(&self, transaction: NewTransaction) {
        let account_id = transaction.account_id;
        tracing::info!("Creating transaction for account {}", account_id);

        match self.api.create_transaction(transaction).await {
            Ok(()) => {
                self.send(DataEvent::TransactionCreated);
                self.load_transactions(account_id).await;
            }
            Err(e) => {
                tracing::error!("Failed to create transaction: {}", e);
                self.send(DataEvent::TransactionCreateFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn import_csv(&self, account_id: Option<RecordId>, path: PathBuf) {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());

        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                self.send(DataEvent::CsvImportFailed {
                    error: format!("Could not read {}: {}", path.display(), e),
                });
                return;
            }
        };

        tracing::info!("Uploading {} ({} bytes)", file_name, contents.len());
        match self.api.upload_csv(file_name.clone(), contents).await {
            Ok(()) => {
                self.send(DataEvent::CsvImported { file_name });
                if let Some(account_id) = account_id {
                    self.load_transactions(account_id).await;
                }
            }
            Err(e) => {
                tracing::error!("CSV upload failed: {}", e);
                self.send(DataEvent::CsvImportFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn save_category(&self, category_id: Option<RecordId>, category: SaveCategory) {
        let result = match category_id {
            Some(id) => {
                tracing::info!("Updating category {}", id);
                self.api.update_category(id, category).await
            }
            None => {
                tracing::info!("Creating category {}", category.name);
                self.api.create_category(category).await
            }
        };

        match result {
            Ok(()) => {
                self.send(DataEvent::CategorySaved {
                    created: category_id.is_none(),
                });
                self.load_categories().await;
            }
            Err(e) => {
                tracing::error!("Failed to save category: {}", e);
                self.send(DataEvent::CategorySaveFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn delete_category(&self, category_id: RecordId) {
        tracing::info!("Deleting category {}", category_id);

        match self.api.delete_category(category_id).await {
            Ok(()) => {
                self.send(DataEvent::CategoryDeleted { category_id });
                self.load_categories().await;
            }
            Err(e) => {
                tracing::error!("Failed to delete category {}: {}", category_id, e);
                self.send(DataEvent::CategoryDeleteFailed {
                    category_id,
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn create_budget(&self, budget: NewBudget) {
        tracing::info!(
            "Creating budget for {} ({}/{})",
            budget.category,
            budget.month,
            budget.year
        );

        match self.api.create_budget(budget).await {
            Ok(()) => {
                self.send(DataEvent::BudgetCreated);
                self.load_budgets().await;
            }
            Err(e) => {
                tracing::error!("Failed to create budget: {}", e);
                self.send(DataEvent::BudgetCreateFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn delete_budget(&self, budget_id: RecordId) {
        tracing::info!("Deleting budget {}", budget_id);

        match self.api.delete_budget(budget_id).await {
            Ok(()) => {
                self.send(DataEvent::BudgetDeleted { budget_id });
                self.load_budgets().await;
            }
            Err(e) => {
                tracing::error!("Failed to delete budget {}: {}", budget_id, e);
                self.send(DataEvent::BudgetDeleteFailed {
                    budget_id,
                    error: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_api::{
        endpoints::{
            accounts::Account,
            budgets::Budget,
            categories::Category,
            transactions::{CategorySummaryRow, Transaction, TxnType},
        },
        ApiError,
    };
    use std::sync::Mutex;

    /// In-memory backend that records every call it receives
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        fail_mutations: bool,
        fail_summary: bool,
    }

    impl FakeApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn mutation_result(&self, path: &str) -> Result<(), ApiError> {
            if self.fail_mutations {
                Err(ApiError::HttpStatus {
                    status: 500,
                    path: path.to_string(),
                    detail: "Internal Server Error".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl FinanceApi for FakeApi {
        async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
            self.record("GET /accounts");
            Ok(self.accounts.clone())
        }

        async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
            self.record("GET /transactions");
            Ok(self.transactions.clone())
        }

        async fn list_account_transactions(
            &self,
            account_id: RecordId,
        ) -> Result<Vec<Transaction>, ApiError> {
            self.record(format!("GET /transactions/{}", account_id));
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.account_id == account_id)
                .cloned()
                .collect())
        }

        async fn category_summary(&self) -> Result<Vec<CategorySummaryRow>, ApiError> {
            self.record("GET /transactions/category-summary");
            if self.fail_summary {
                return Err(ApiError::Network {
                    path: "/transactions/category-summary".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            Ok(vec![CategorySummaryRow {
                category: Some("Food".to_string()),
                total: 100.0,
            }])
        }

        async fn create_transaction(&self, _transaction: NewTransaction) -> Result<(), ApiError> {
            self.record("POST /transactions");
            self.mutation_result("/transactions")
        }

        async fn upload_csv(&self, file_name: String, _contents: Vec<u8>) -> Result<(), ApiError> {
            self.record(format!("POST /transactions/upload-csv {}", file_name));
            self.mutation_result("/transactions/upload-csv")
        }

        async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
            self.record("GET /categories/");
            Ok(self.categories.clone())
        }

        async fn create_category(&self, _category: SaveCategory) -> Result<(), ApiError> {
            self.record("POST /categories/");
            self.mutation_result("/categories/")
        }

        async fn update_category(
            &self,
            category_id: RecordId,
            _category: SaveCategory,
        ) -> Result<(), ApiError> {
            self.record(format!("PUT /categories/{}", category_id));
            self.mutation_result("/categories/")
        }

        async fn delete_category(&self, category_id: RecordId) -> Result<(), ApiError> {
            self.record(format!("DELETE /categories/{}", category_id));
            self.mutation_result(&format!("/categories/{}", category_id))
        }

        async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
            self.record("GET /budgets/");
            Ok(Vec::new())
        }

        async fn create_budget(&self, _budget: NewBudget) -> Result<(), ApiError> {
            self.record("POST /budgets/");
            self.mutation_result("/budgets/")
        }

        async fn delete_budget(&self, budget_id: RecordId) -> Result<(), ApiError> {
            self.record(format!("DELETE /budgets/{}", budget_id));
            self.mutation_result(&format!("/budgets/{}", budget_id))
        }
    }

    fn account(id: RecordId) -> Account {
        Account {
            id,
            bank_name: format!("Bank {id}"),
            account_type: "savings".to_string(),
            balance: 1000.0,
        }
    }

    fn transaction(id: RecordId, account_id: RecordId) -> Transaction {
        Transaction {
            id,
            account_id,
            description: Some("Coffee".to_string()),
            amount: 120.0,
            txn_type: TxnType::Debit,
            date: None,
            category: Some("Food".to_string()),
        }
    }

    fn loader(api: FakeApi) -> (DataLoader<FakeApi>, mpsc::UnboundedReceiver<DataEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DataLoader::new(Arc::new(api), tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<DataEvent>) -> Vec<DataEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_delete_category_then_refetch() {
        let (loader, mut rx) = loader(FakeApi {
            categories: vec![Category {
                id: 2,
                name: "Rent".to_string(),
                keywords: None,
            }],
            ..Default::default()
        });

        loader.run(DataRequest::DeleteCategory { category_id: 7 }).await;

        assert_eq!(
            loader.api.calls(),
            vec!["DELETE /categories/7", "GET /categories/"]
        );
        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            DataEvent::CategoryDeleted { category_id: 7 }
        ));
        assert!(matches!(
            &events[1],
            DataEvent::CategoriesLoaded { categories } if categories.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_refetch() {
        let (loader, mut rx) = loader(FakeApi {
            fail_mutations: true,
            ..Default::default()
        });

        loader.run(DataRequest::DeleteCategory { category_id: 7 }).await;

        assert_eq!(loader.api.calls(), vec!["DELETE /categories/7"]);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DataEvent::CategoryDeleteFailed { category_id: 7, error } if error.contains("500")
        ));
    }

    #[tokio::test]
    async fn test_dashboard_loads_everything() {
        let (loader, mut rx) = loader(FakeApi {
            accounts: vec![account(1)],
            transactions: vec![transaction(1, 1), transaction(2, 1)],
            ..Default::default()
        });

        loader.run(DataRequest::LoadDashboard).await;

        let mut calls = loader.api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "GET /accounts",
                "GET /transactions",
                "GET /transactions/category-summary"
            ]
        );
        let events = drain(&mut rx);
        assert!(matches!(
            &events[..],
            [DataEvent::DashboardLoaded { accounts, transactions, category_summary }]
                if accounts.len() == 1 && transactions.len() == 2 && category_summary.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_dashboard_tolerates_missing_summary() {
        let (loader, mut rx) = loader(FakeApi {
            accounts: vec![account(1)],
            fail_summary: true,
            ..Default::default()
        });

        loader.load_dashboard().await;

        let events = drain(&mut rx);
        assert!(matches!(
            &events[..],
            [DataEvent::DashboardLoaded { category_summary, .. }] if category_summary.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_transactions_page_keeps_preferred_account() {
        let (loader, mut rx) = loader(FakeApi {
            accounts: vec![account(1), account(2)],
            transactions: vec![transaction(1, 1), transaction(2, 2)],
            ..Default::default()
        });

        loader.load_transactions_page(Some(2)).await;

        assert_eq!(loader.api.calls(), vec!["GET /accounts", "GET /transactions/2"]);
        let events = drain(&mut rx);
        assert!(matches!(events[0], DataEvent::AccountsLoaded { .. }));
        assert!(matches!(
            &events[1],
            DataEvent::TransactionsLoaded { account_id: 2, transactions } if transactions.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_transactions_page_without_accounts() {
        let (loader, mut rx) = loader(FakeApi::default());

        loader.load_transactions_page(None).await;

        assert_eq!(loader.api.calls(), vec!["GET /accounts"]);
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test]
    async fn test_csv_import_refetches_selected_account() {
        let path = std::env::temp_dir().join("finboard-import-test.csv");
        tokio::fs::write(&path, b"date,description,amount\n2025-01-01,Coffee,120\n")
            .await
            .unwrap();

        let (loader, mut rx) = loader(FakeApi {
            accounts: vec![account(3)],
            ..Default::default()
        });

        loader.import_csv(Some(3), path.clone()).await;

        assert_eq!(
            loader.api.calls(),
            vec![
                "POST /transactions/upload-csv finboard-import-test.csv",
                "GET /transactions/3"
            ]
        );
        let events = drain(&mut rx);
        assert!(matches!(&events[0], DataEvent::CsvImported { file_name } if file_name == "finboard-import-test.csv"));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_csv_import_failure_leaves_list() {
        let path = std::env::temp_dir().join("finboard-import-fail.csv");
        tokio::fs::write(&path, b"bad").await.unwrap();

        let (loader, mut rx) = loader(FakeApi {
            fail_mutations: true,
            ..Default::default()
        });

        loader.import_csv(Some(3), path.clone()).await;

        assert_eq!(loader.api.calls().len(), 1);
        let events = drain(&mut rx);
        assert!(matches!(&events[..], [DataEvent::CsvImportFailed { .. }]));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_csv_import_missing_file() {
        let (loader, mut rx) = loader(FakeApi::default());

        loader
            .import_csv(None, PathBuf::from("/definitely/not/here.csv"))
            .await;

        assert!(loader.api.calls().is_empty());
        let events = drain(&mut rx);
        assert!(matches!(
            &events[..],
            [DataEvent::CsvImportFailed { error }] if error.starts_with("Could not read")
        ));
    }

    #[tokio::test]
    async fn test_save_category_create_vs_update() {
        let (loader, mut rx) = loader(FakeApi::default());
        let body = SaveCategory {
            name: "Travel".to_string(),
            keywords: "uber".to_string(),
        };

        loader.save_category(None, body.clone()).await;
        loader.save_category(Some(4), body).await;

        assert_eq!(
            loader.api.calls(),
            vec![
                "POST /categories/",
                "GET /categories/",
                "PUT /categories/4",
                "GET /categories/"
            ]
        );
        let events = drain(&mut rx);
        assert!(matches!(events[0], DataEvent::CategorySaved { created: true }));
        assert!(matches!(events[2], DataEvent::CategorySaved { created: false }));
    }

    #[tokio::test]
    async fn test_create_transaction_refetches_account() {
        let (loader, mut rx) = loader(FakeApi::default());

        loader
            .create_transaction(NewTransaction {
                account_id: 5,
                description: "Salary".to_string(),
                amount: 50000.0,
                txn_type: TxnType::Credit,
            })
            .await;

        assert_eq!(
            loader.api.calls(),
            vec!["POST /transactions", "GET /transactions/5"]
        );
        let events = drain(&mut rx);
        assert!(matches!(events[0], DataEvent::TransactionCreated));
    }

    #[tokio::test]
    async fn test_delete_budget_then_refetch() {
        let (loader, mut rx) = loader(FakeApi::default());

        loader.run(DataRequest::DeleteBudget { budget_id: 9 }).await;

        assert_eq!(loader.api.calls(), vec!["DELETE /budgets/9", "GET /budgets/"]);
        let events = drain(&mut rx);
        assert!(matches!(events[0], DataEvent::BudgetDeleted { budget_id: 9 }));
        assert!(matches!(events[1], DataEvent::BudgetsLoaded { .. }));
    }
}
