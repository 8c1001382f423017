pub mod reducer;
pub mod validators;

use crate::config::Settings;
use crate::currency::Currency;
use crate::notifications::NotificationQueue;
use crate::summary::{self, CategorySlice, Summary};
use crate::ui::screens::Screen;
use chrono::Datelike;
use finboard_api::endpoints::{
    RecordId,
    accounts::Account,
    budgets::Budget,
    categories::Category,
    transactions::{Transaction, TxnType},
};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::collections::HashSet;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        Self::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

/// Represents input mode for screens that support editing
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    TransactionForm,
    CsvImport,
    CategoryForm,
    DeleteConfirmation,
    BudgetForm,
}

/// Top-level pages reachable from the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Transactions,
    Categories,
    Budgets,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::Transactions,
        Page::Categories,
        Page::Budgets,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Categories => "Categories",
            Self::Budgets => "Budgets",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Blocking message shown until the user dismisses it
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Ordered fields of a modal form
pub trait FormField: Copy + PartialEq + 'static {
    const ORDER: &'static [Self];

    fn label(self) -> &'static str;

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransactionField {
    #[default]
    Description,
    Amount,
    Type,
}

impl FormField for TransactionField {
    const ORDER: &'static [Self] = &[Self::Description, Self::Amount, Self::Type];

    fn label(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Type => "Type",
        }
    }
}

/// State for the add-transaction modal
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFormState {
    pub account_id: RecordId,
    pub current_field: TransactionField,
    pub description: String,
    pub amount: String,
    pub txn_type: TxnType,
    pub validation_error: Option<String>,
    /// A create request is in flight; further submits are ignored
    pub submitting: bool,
}

impl TransactionFormState {
    pub fn new(account_id: RecordId) -> Self {
        Self {
            account_id,
            current_field: TransactionField::default(),
            description: String::new(),
            amount: String::new(),
            txn_type: TxnType::Credit,
            validation_error: None,
            submitting: false,
        }
    }

    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.current_field {
            TransactionField::Description => Some(&mut self.description),
            TransactionField::Amount => Some(&mut self.amount),
            TransactionField::Type => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Keywords,
}

impl FormField for CategoryField {
    const ORDER: &'static [Self] = &[Self::Name, Self::Keywords];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Keywords => "Keywords",
        }
    }
}

/// State for the create/edit category modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryFormState {
    /// `Some` when editing an existing category
    pub editing_id: Option<RecordId>,
    pub current_field: CategoryField,
    pub name: String,
    pub keywords: String,
    pub validation_error: Option<String>,
    pub submitting: bool,
}

impl CategoryFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            editing_id: Some(category.id),
            name: category.name.clone(),
            keywords: category.keywords.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn field_mut(&mut self) -> &mut String {
        match self.current_field {
            CategoryField::Name => &mut self.name,
            CategoryField::Keywords => &mut self.keywords,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BudgetField {
    #[default]
    Category,
    Limit,
    Month,
    Year,
}

impl FormField for BudgetField {
    const ORDER: &'static [Self] = &[Self::Category, Self::Limit, Self::Month, Self::Year];

    fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Limit => "Limit",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

/// State for the add-budget modal. Month and year start at the current date.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetFormState {
    pub current_field: BudgetField,
    pub category: String,
    pub limit: String,
    pub month: String,
    pub year: String,
    pub validation_error: Option<String>,
}

impl BudgetFormState {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            current_field: BudgetField::default(),
            category: String::new(),
            limit: String::new(),
            month: month.to_string(),
            year: year.to_string(),
            validation_error: None,
        }
    }

    pub fn for_current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.month(), today.year())
    }

    pub fn field_mut(&mut self) -> &mut String {
        match self.current_field {
            BudgetField::Category => &mut self.category,
            BudgetField::Limit => &mut self.limit,
            BudgetField::Month => &mut self.month,
            BudgetField::Year => &mut self.year,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // Page-scoped feedback
    pub notifications: NotificationQueue,
    pub alert: Option<Alert>,

    /// Transactions already announced by a dashboard toast
    pub seen_transaction_ids: HashSet<RecordId>,
    pub default_currency: Currency,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            history: vec![Screen::for_page(Page::Dashboard, settings.default_currency)],

            notifications: NotificationQueue::new(
                settings.notification_timeout(),
                settings.max_notifications,
            ),
            alert: None,

            seen_transaction_ids: HashSet::new(),
            default_currency: settings.default_currency,

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Mutable access to the mounted page, even while the log screen is on top
    pub fn page_screen_mut(&mut self) -> &mut Screen {
        self.history
            .first_mut()
            .expect("Navigation stack should never be empty")
    }

    /// The page at the root of the navigation stack
    pub fn current_page(&self) -> Page {
        self.history
            .first()
            .and_then(Screen::page)
            .unwrap_or(Page::Dashboard)
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Replace the whole stack with a freshly mounted page. Toasts belong to
    /// the page that raised them, so they are dropped here.
    pub fn switch_page(&mut self, screen: Screen) {
        tracing::debug!("Switching page to {:?}", screen.page());
        self.history = vec![screen];
        self.notifications.clear();
        self.help_visible = false;
        self.pending_key = None;
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let alert = Alert {
            title: title.into(),
            message: message.into(),
        };
        tracing::warn!("{}: {}", alert.title, alert.message);
        self.alert = Some(alert);
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Dashboard(state) => &mut state.dashboard_loading,
            Screen::Transactions(state) => &mut state.transactions_loading,
            Screen::Categories(state) => &mut state.categories_loading,
            Screen::Budgets(state) => &mut state.budgets_loading,
            // Logs screen has no loading state
            Screen::Logs(_) => return None,
        };

        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the preferred account while it still exists, otherwise fall back to
/// the first one
pub fn pick_account(accounts: &[Account], preferred: Option<RecordId>) -> Option<RecordId> {
    preferred
        .filter(|id| accounts.iter().any(|a| a.id == *id))
        .or_else(|| accounts.first().map(|a| a.id))
}

#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub category_breakdown: Vec<CategorySlice>,
    pub summary: Option<Summary>,
    pub dashboard_loading: LoadingState,
    pub currency: Currency,
    pub table_state: RefCell<TableState>,
}

#[derive(Default, Debug, Clone)]
pub struct TransactionsState {
    pub accounts: Vec<Account>,
    pub selected_account_id: Option<RecordId>,
    pub transactions: Vec<Transaction>,
    pub transactions_loading: LoadingState,
    pub currency: Currency,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub filter_query: String,

    pub form: Option<TransactionFormState>,
    pub csv_path: String,
}

impl TransactionsState {
    pub fn selected_account(&self) -> Option<&Account> {
        self.selected_account_id
            .and_then(|id| self.accounts.iter().find(|a| a.id == id))
    }

    /// Neighbouring account in list order, `None` at either end
    pub fn adjacent_account_id(&self, forward: bool) -> Option<RecordId> {
        let current = self
            .selected_account_id
            .and_then(|id| self.accounts.iter().position(|a| a.id == id))?;

        let target = if forward {
            current.checked_add(1)?
        } else {
            current.checked_sub(1)?
        };
        self.accounts.get(target).map(|a| a.id)
    }

    /// Income and expenses of the loaded list (balance is per-account, not summed here)
    pub fn stats(&self) -> Summary {
        summary::compute_summary(&[], &self.transactions)
    }

    /// Returns filtered transactions based on the current filter query.
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        if self.filter_query.is_empty() {
            return self.transactions.iter().collect();
        }

        let query_lower = self.filter_query.to_lowercase();

        fn optional_match(opt: Option<&str>, search: &str) -> bool {
            let Some(req) = opt else {
                return false;
            };

            req.to_lowercase().contains(search)
        }

        self.transactions
            .iter()
            .filter(|t| {
                let description_match = optional_match(t.description.as_deref(), &query_lower);
                let category_match = optional_match(t.category.as_deref(), &query_lower);
                let amount_match = format!("{:.2}", t.amount).contains(&query_lower);
                let type_match = t.txn_type.to_string().contains(&query_lower);
                description_match || category_match || amount_match || type_match
            })
            .collect()
    }
}

#[derive(Default, Debug, Clone)]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub categories_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub form: Option<CategoryFormState>,
    pub delete_confirmation_id: Option<RecordId>,
}

impl CategoriesState {
    pub fn selected_category(&self) -> Option<&Category> {
        let idx = self.table_state.borrow().selected()?;
        self.categories.get(idx)
    }

    pub fn pending_delete(&self) -> Option<&Category> {
        let id = self.delete_confirmation_id?;
        self.categories.iter().find(|c| c.id == id)
    }
}

#[derive(Default, Debug, Clone)]
pub struct BudgetsState {
    pub budgets: Vec<Budget>,
    pub budgets_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub form: Option<BudgetFormState>,
}

impl BudgetsState {
    pub fn selected_budget(&self) -> Option<&Budget> {
        let idx = self.table_state.borrow().selected()?;
        self.budgets.get(idx)
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }

    fn select_first(&mut self) {
        if self.num_items() > 0 {
            self.table_state().borrow_mut().select_first();
        }
    }

    fn select_last(&mut self) {
        let num_items = self.num_items();
        if num_items > 0 {
            self.table_state().borrow_mut().select(Some(num_items - 1));
        }
    }

    /// Keep the selection inside the list after it was replaced
    fn clamp_selection(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        match table_state.selected() {
            _ if num_items == 0 => table_state.select(None),
            None => table_state.select(Some(0)),
            Some(idx) if idx >= num_items => table_state.select(Some(num_items - 1)),
            Some(_) => {}
        }
    }
}

impl Scrollable for DashboardState {
    fn num_items(&self) -> usize {
        self.transactions.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for TransactionsState {
    fn num_items(&self) -> usize {
        self.filtered_transactions().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for CategoriesState {
    fn num_items(&self) -> usize {
        self.categories.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for BudgetsState {
    fn num_items(&self) -> usize {
        self.budgets.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
