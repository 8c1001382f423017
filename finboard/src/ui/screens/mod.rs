pub mod budgets_screen;
pub mod categories_screen;
pub mod dashboard_screen;
pub mod logs_screen;
pub mod transactions_screen;

use crate::currency::Currency;
use crate::state::{
    BudgetsState, CategoriesState, DashboardState, LoadingState, LogsState, Page,
    TransactionsState,
};

#[derive(Debug, Clone)]
pub enum Screen {
    Dashboard(DashboardState),
    Transactions(Box<TransactionsState>),
    Categories(CategoriesState),
    Budgets(BudgetsState),
    Logs(LogsState),
}

impl Screen {
    /// A page in its initial loading state, ready to be mounted
    pub fn for_page(page: Page, currency: Currency) -> Self {
        match page {
            Page::Dashboard => Screen::Dashboard(DashboardState {
                dashboard_loading: LoadingState::loading(),
                currency,
                ..Default::default()
            }),
            Page::Transactions => Screen::Transactions(Box::new(TransactionsState {
                transactions_loading: LoadingState::loading(),
                currency,
                ..Default::default()
            })),
            Page::Categories => Screen::Categories(CategoriesState {
                categories_loading: LoadingState::loading(),
                ..Default::default()
            }),
            Page::Budgets => Screen::Budgets(BudgetsState {
                budgets_loading: LoadingState::loading(),
                ..Default::default()
            }),
        }
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Screen::Dashboard(_) => Some(Page::Dashboard),
            Screen::Transactions(_) => Some(Page::Transactions),
            Screen::Categories(_) => Some(Page::Categories),
            Screen::Budgets(_) => Some(Page::Budgets),
            Screen::Logs(_) => None,
        }
    }
}
