use std::{collections::BTreeMap, path::Path, sync::Arc};

use crate::config::{default_seed_months, Config, DEFAULT_STORAGE_KEY};
use crate::core::errors::ServiceResult;
use crate::core::ids::{IdGenerator, UuidIds};
use crate::core::services::{
    CalendarService, CategoryService, ExpenseService, MonthScope, MonthService, SummaryService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    AppState, BudgetMonthKey, BudgetTotals, Category, CategoryTotals, MonthlyBudget, RawAmount,
    WealthSheet, WealthSide,
};
use crate::errors::StoreError;
use crate::migrate::{self, LoadReport};
use crate::storage::{JsonFileStorage, StorageBackend};

pub type Subscriber = Box<dyn Fn(&AppState) + Send + Sync>;

/// Settings a store needs to load and to answer calendar queries.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub storage_key: String,
    pub seed_months: Vec<BudgetMonthKey>,
    pub future_year_window: i32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl StoreOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            seed_months: config.seed_months.clone(),
            future_year_window: config.future_year_window,
        }
        .sanitized()
    }

    /// Blank keys and empty seed lists fall back to the defaults.
    fn sanitized(mut self) -> Self {
        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        } else {
            self.storage_key = self.storage_key.trim().to_string();
        }
        if self.seed_months.is_empty() {
            tracing::debug!("no seed months configured; using defaults");
            self.seed_months = default_seed_months();
        }
        self.future_year_window = self.future_year_window.max(0);
        self
    }
}

/// Single-writer container for the budget state.
///
/// Every mutation runs a pure service against the current snapshot. Accepted
/// results replace the snapshot, notify subscribers and are written to storage;
/// rejected input leaves the snapshot untouched. Storage failures are logged and
/// never undo an in-memory change.
pub struct BudgetStore {
    state: Arc<AppState>,
    storage: Box<dyn StorageBackend>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    options: StoreOptions,
    subscribers: Vec<Subscriber>,
    load_report: LoadReport,
    wealth: WealthSheet,
}

impl BudgetStore {
    /// Loads (and migrates) whatever `storage` holds under the configured key.
    pub fn open(storage: Box<dyn StorageBackend>, options: StoreOptions) -> Self {
        let options = options.sanitized();
        let (raw, readable) = match storage.read(&options.storage_key) {
            Ok(raw) => (raw, true),
            Err(err) => {
                tracing::warn!(
                    key = %options.storage_key,
                    error = %err,
                    "failed to read stored budget data; continuing in memory"
                );
                (None, false)
            }
        };
        let load_report = migrate::load_state(raw.as_deref(), &options.seed_months);
        let store = Self {
            state: Arc::new(load_report.state.clone()),
            storage,
            ids: Box::new(UuidIds),
            clock: Box::new(SystemClock),
            options,
            subscribers: Vec::new(),
            load_report,
            wealth: WealthSheet::default(),
        };
        // An unreadable backend may still hold the user's data; don't overwrite it.
        if readable {
            store.persist_or_warn();
        }
        store
    }

    /// Opens a file-backed store under the config's data directory.
    pub fn open_with_config(config: &Config, base_dir: &Path) -> Result<Self, StoreError> {
        let storage = JsonFileStorage::new(config.resolve_data_dir(base_dir))?;
        Ok(Self::open(
            Box::new(storage),
            StoreOptions::from_config(config),
        ))
    }

    pub fn with_ids(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Registers a callback invoked with every committed snapshot.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Shared handle to the current snapshot; later mutations never change it.
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Writes the current snapshot to storage.
    pub fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(self.state.as_ref())?;
        self.storage.write(&self.options.storage_key, &json)
    }

    // Read accessors.

    pub fn categories(&self) -> &[Category] {
        self.state.categories()
    }

    pub fn budgets(&self) -> &BTreeMap<BudgetMonthKey, MonthlyBudget> {
        &self.state.budgets
    }

    pub fn selected_budget_key(&self) -> Option<BudgetMonthKey> {
        self.state.selected_budget_key
    }

    pub fn selected_budget(&self) -> Option<&MonthlyBudget> {
        self.state.selected_budget()
    }

    pub fn expense_spent(&self) -> &BTreeMap<String, f64> {
        &self.state.expense_spent
    }

    pub fn expense_other_spent(&self) -> &BTreeMap<String, f64> {
        &self.state.expense_other_spent
    }

    pub fn expense_notes(&self) -> &BTreeMap<String, String> {
        &self.state.expense_notes
    }

    pub fn other_person_name(&self) -> &str {
        &self.state.other_person_name
    }

    // Mutations. Each returns whether the change was applied.

    /// Returns the new category id when the name was accepted.
    pub fn add_category(&mut self, name: &str) -> Option<String> {
        let outcome = CategoryService::add_category(&self.state, name, self.ids.as_ref());
        self.commit_with("add_category", outcome)
    }

    pub fn remove_category(&mut self, category_id: &str) -> bool {
        let outcome = CategoryService::remove_category(&self.state, category_id);
        self.commit("remove_category", outcome)
    }

    pub fn rename_category(&mut self, category_id: &str, name: &str) -> bool {
        let outcome = CategoryService::rename_category(&self.state, category_id, name);
        self.commit("rename_category", outcome)
    }

    /// Returns the new sub-category id when the name was accepted.
    pub fn add_sub_category(&mut self, category_id: &str, name: &str) -> Option<String> {
        let outcome =
            CategoryService::add_sub_category(&self.state, category_id, name, self.ids.as_ref());
        self.commit_with("add_sub_category", outcome)
    }

    pub fn remove_sub_category(&mut self, category_id: &str, sub_category_id: &str) -> bool {
        let outcome =
            CategoryService::remove_sub_category(&self.state, category_id, sub_category_id);
        self.commit("remove_sub_category", outcome)
    }

    pub fn rename_sub_category(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        name: &str,
    ) -> bool {
        let outcome = CategoryService::rename_sub_category(
            &self.state,
            category_id,
            sub_category_id,
            name,
        );
        self.commit("rename_sub_category", outcome)
    }

    pub fn set_sub_category_budget<'a>(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> bool {
        let outcome = CategoryService::set_sub_category_budget(
            &self.state,
            category_id,
            sub_category_id,
            value,
        );
        self.commit("set_sub_category_budget", outcome)
    }

    pub fn set_expense_spent<'a>(&mut self, key: &str, value: impl Into<RawAmount<'a>>) -> bool {
        let outcome = ExpenseService::set_expense_spent(&self.state, key, value);
        self.commit("set_expense_spent", outcome)
    }

    pub fn set_expense_other_spent<'a>(
        &mut self,
        key: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> bool {
        let outcome = ExpenseService::set_expense_other_spent(&self.state, key, value);
        self.commit("set_expense_other_spent", outcome)
    }

    pub fn set_expense_note(&mut self, category_id: &str, text: &str) -> bool {
        let outcome = ExpenseService::set_expense_note(&self.state, category_id, text);
        self.commit("set_expense_note", outcome)
    }

    pub fn set_other_person_name(&mut self, text: &str) -> bool {
        let outcome = ExpenseService::set_other_person_name(&self.state, text);
        self.commit("set_other_person_name", outcome)
    }

    pub fn set_budget_gross_income<'a>(&mut self, value: impl Into<RawAmount<'a>>) -> bool {
        let outcome = MonthService::set_budget_gross_income(&self.state, value);
        self.commit("set_budget_gross_income", outcome)
    }

    pub fn set_budget_net_income<'a>(&mut self, value: impl Into<RawAmount<'a>>) -> bool {
        let outcome = MonthService::set_budget_net_income(&self.state, value);
        self.commit("set_budget_net_income", outcome)
    }

    pub fn add_budget_month(&mut self, year: i32, month: u32) -> bool {
        let outcome = MonthService::add_budget_month(&self.state, year, month);
        self.commit("add_budget_month", outcome)
    }

    pub fn remove_budget_month(&mut self, key: &str) -> bool {
        let outcome = MonthService::remove_budget_month(&self.state, key);
        self.commit("remove_budget_month", outcome)
    }

    pub fn set_selected_budget(&mut self, key: &str) -> bool {
        let outcome = MonthService::set_selected_budget(&self.state, key);
        self.commit("set_selected_budget", outcome)
    }

    // Derived views.

    pub fn total_budget(&self) -> f64 {
        SummaryService::total_budget(&self.state)
    }

    pub fn total_spent(&self) -> f64 {
        SummaryService::total_spent(&self.state)
    }

    pub fn remaining(&self) -> f64 {
        SummaryService::remaining(&self.state)
    }

    pub fn totals(&self) -> BudgetTotals {
        SummaryService::totals(&self.state)
    }

    pub fn category_totals(&self, category_id: &str) -> Option<CategoryTotals> {
        SummaryService::category_totals(&self.state, category_id)
    }

    pub fn per_category(&self) -> Vec<CategoryTotals> {
        SummaryService::per_category(&self.state)
    }

    pub fn other_person_label(&self) -> String {
        SummaryService::other_person_label(&self.state)
    }

    pub fn other_person_possessive(&self) -> String {
        SummaryService::other_person_possessive(&self.state)
    }

    pub fn month_scope(&self, year: i32, month: u32) -> MonthScope {
        CalendarService::month_scope(self.clock.as_ref(), year, month)
    }

    pub fn is_past_month(&self, year: i32, month: u32) -> bool {
        CalendarService::is_past_month(self.clock.as_ref(), year, month)
    }

    pub fn is_current_month(&self, year: i32, month: u32) -> bool {
        CalendarService::is_current_month(self.clock.as_ref(), year, month)
    }

    pub fn is_future_month(&self, year: i32, month: u32) -> bool {
        CalendarService::is_future_month(self.clock.as_ref(), year, month)
    }

    pub fn years_with_budgets(&self) -> Vec<i32> {
        CalendarService::years_with_budgets(&self.state)
    }

    pub fn months_for_year(&self, year: i32) -> Vec<u32> {
        CalendarService::months_for_year(&self.state, year)
    }

    pub fn next_month_to_add(&self, year: i32) -> Option<u32> {
        CalendarService::next_month_to_add(&self.state, year)
    }

    pub fn future_year_to_add(&self) -> Option<i32> {
        CalendarService::future_year_to_add(
            &self.state,
            self.clock.as_ref(),
            self.options.future_year_window,
        )
    }

    pub fn can_add_future_year(&self) -> bool {
        self.future_year_to_add().is_some()
    }

    // Session-only net-worth sheet.

    pub fn wealth(&self) -> &WealthSheet {
        &self.wealth
    }

    pub fn set_wealth_amount<'a>(
        &mut self,
        side: WealthSide,
        id: &str,
        value: impl Into<RawAmount<'a>>,
    ) {
        self.wealth = self.wealth.with_amount(side, id, value);
    }

    fn commit(&mut self, operation: &'static str, outcome: ServiceResult<AppState>) -> bool {
        self.commit_with(operation, outcome.map(|next| (next, ())))
            .is_some()
    }

    fn commit_with<T>(
        &mut self,
        operation: &'static str,
        outcome: ServiceResult<(AppState, T)>,
    ) -> Option<T> {
        match outcome {
            Ok((next, value)) => {
                self.replace(next);
                Some(value)
            }
            Err(err) => {
                tracing::debug!(operation, error = %err, "mutation ignored");
                None
            }
        }
    }

    fn replace(&mut self, next: AppState) {
        debug_assert!(
            {
                let valid = next.valid_keys();
                next.expense_spent
                    .keys()
                    .chain(next.expense_other_spent.keys())
                    .all(|key| valid.contains(key))
            },
            "spend maps reference lines outside the selected month"
        );
        self.state = Arc::new(next);
        for subscriber in &self.subscribers {
            subscriber(self.state.as_ref());
        }
        self.persist_or_warn();
    }

    fn persist_or_warn(&self) {
        if let Err(err) = self.persist() {
            tracing::warn!(
                key = %self.options.storage_key,
                error = %err,
                "failed to persist budget data; changes kept in memory"
            );
        }
    }
}
