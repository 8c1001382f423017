use std::future::Future;

use finboard_api::{
    endpoints::{
        RecordId,
        accounts::Account,
        budgets::{Budget, NewBudget},
        categories::{Category, SaveCategory},
        transactions::{CategorySummaryRow, NewTransaction, Transaction},
    },
    ApiError, Client, Request,
};

/// Backend operations the data loader depends on.
///
/// Implemented by [`finboard_api::Client`] in production and by an in-memory
/// fake in the loader tests.
pub trait FinanceApi: Send + Sync + 'static {
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, ApiError>> + Send;

    fn list_transactions(&self) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    fn list_account_transactions(
        &self,
        account_id: RecordId,
    ) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    fn category_summary(
        &self,
    ) -> impl Future<Output = Result<Vec<CategorySummaryRow>, ApiError>> + Send;

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn upload_csv(
        &self,
        file_name: String,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, ApiError>> + Send;

    fn create_category(
        &self,
        category: SaveCategory,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn update_category(
        &self,
        category_id: RecordId,
        category: SaveCategory,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_category(
        &self,
        category_id: RecordId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn list_budgets(&self) -> impl Future<Output = Result<Vec<Budget>, ApiError>> + Send;

    fn create_budget(&self, budget: NewBudget)
        -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_budget(
        &self,
        budget_id: RecordId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl FinanceApi for Client {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.send(Request::accounts().list()).await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.send(Request::transactions().list()).await
    }

    async fn list_account_transactions(
        &self,
        account_id: RecordId,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.send(Request::transactions().for_account(account_id))
            .await
    }

    async fn category_summary(&self) -> Result<Vec<CategorySummaryRow>, ApiError> {
        self.send(Request::transactions().category_summary()).await
    }

    async fn create_transaction(&self, transaction: NewTransaction) -> Result<(), ApiError> {
        self.send(Request::transactions().create(transaction))
            .await
            .map(|_| ())
    }

    async fn upload_csv(&self, file_name: String, contents: Vec<u8>) -> Result<(), ApiError> {
        let response = Client::upload_csv(self, &file_name, contents).await?;
        tracing::debug!("CSV upload response: {}", response);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.send(Request::categories().list()).await
    }

    async fn create_category(&self, category: SaveCategory) -> Result<(), ApiError> {
        self.send(
            Request::categories()
                .create(category.name)
                .keywords(category.keywords),
        )
        .await
        .map(|_| ())
    }

    async fn update_category(
        &self,
        category_id: RecordId,
        category: SaveCategory,
    ) -> Result<(), ApiError> {
        self.send(
            Request::categories()
                .update(category_id, category.name)
                .keywords(category.keywords),
        )
        .await
        .map(|_| ())
    }

    async fn delete_category(&self, category_id: RecordId) -> Result<(), ApiError> {
        self.send(Request::categories().delete(category_id))
            .await
            .map(|_| ())
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.send(Request::budgets().list()).await
    }

    async fn create_budget(&self, budget: NewBudget) -> Result<(), ApiError> {
        self.send(Request::budgets().create(budget))
            .await
            .map(|_| ())
    }

    async fn delete_budget(&self, budget_id: RecordId) -> Result<(), ApiError> {
        self.send(Request::budgets().delete(budget_id))
            .await
            .map(|_| ())
    }
}
