use crate::core::errors::{ServiceError, ServiceResult};
use crate::domain::{catalog, AppState, BudgetMonthKey, MonthlyBudget, RawAmount};

/// Creates, removes and selects budget months and edits their incomes.
pub struct MonthService;

impl MonthService {
    /// Adds a month copied from the most recent earlier month (or the seed catalog) and selects it.
    ///
    /// An existing month is never overwritten.
    pub fn add_budget_month(state: &AppState, year: i32, month: u32) -> ServiceResult<AppState> {
        let key = BudgetMonthKey::new(year, month)
            .ok_or(ServiceError::InvalidMonth { year, month })?;
        if state.budgets.contains_key(&key) {
            return Err(ServiceError::MonthExists(key));
        }

        let budget = match state.budgets.range(..key).next_back() {
            Some((_, prior)) => prior.carry_forward(key),
            None => MonthlyBudget::new(key, catalog::initial_categories()),
        };
        let mut next = state.clone();
        next.budgets.insert(key, budget);
        Self::select(&mut next, Some(key));
        Ok(next)
    }

    /// Deletes a month; a removed selection falls back to the latest remaining month.
    ///
    /// The last remaining month is never removed.
    pub fn remove_budget_month(state: &AppState, key: &str) -> ServiceResult<AppState> {
        let key = Self::existing_key(state, key)?;
        if state.budgets.len() == 1 {
            return Err(ServiceError::LastMonth(key));
        }
        let mut next = state.clone();
        next.budgets.remove(&key);
        if next.selected_budget_key == Some(key) {
            let fallback = next.latest_budget_key();
            Self::select(&mut next, fallback);
        }
        Ok(next)
    }

    pub fn set_selected_budget(state: &AppState, key: &str) -> ServiceResult<AppState> {
        let key = Self::existing_key(state, key)?;
        let mut next = state.clone();
        Self::select(&mut next, Some(key));
        Ok(next)
    }

    pub fn set_budget_gross_income<'a>(
        state: &AppState,
        value: impl Into<RawAmount<'a>>,
    ) -> ServiceResult<AppState> {
        let mut next = state.clone();
        let month = next
            .selected_budget_mut()
            .ok_or(ServiceError::NoSelectedMonth)?;
        month.gross_income = value.into().to_cents();
        Ok(next)
    }

    pub fn set_budget_net_income<'a>(
        state: &AppState,
        value: impl Into<RawAmount<'a>>,
    ) -> ServiceResult<AppState> {
        let mut next = state.clone();
        let month = next
            .selected_budget_mut()
            .ok_or(ServiceError::NoSelectedMonth)?;
        month.net_income = value.into().to_cents();
        Ok(next)
    }

    fn existing_key(state: &AppState, raw: &str) -> ServiceResult<BudgetMonthKey> {
        raw.parse::<BudgetMonthKey>()
            .ok()
            .filter(|key| state.budgets.contains_key(key))
            .ok_or_else(|| ServiceError::MonthNotFound(raw.to_string()))
    }

    /// Spend maps only ever address the selected month, so they follow the selection.
    fn select(state: &mut AppState, key: Option<BudgetMonthKey>) {
        state.selected_budget_key = key;
        let dropped = state.prune_spend_maps();
        if dropped > 0 {
            tracing::debug!(
                dropped,
                selected = ?key.map(|key| key.to_string()),
                "pruned spend entries not present in the selected month"
            );
        }
    }
}
