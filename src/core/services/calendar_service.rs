use std::collections::BTreeSet;

use chrono::Datelike;

use crate::core::time::Clock;
use crate::domain::{AppState, BudgetMonthKey};

/// Where a month sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthScope {
    Past,
    Current,
    Future,
}

/// Calendar views over the set of budget months.
pub struct CalendarService;

impl CalendarService {
    pub fn month_scope(clock: &dyn Clock, year: i32, month: u32) -> MonthScope {
        let today = clock.today();
        let current = (today.year(), today.month());
        match (year, month).cmp(&current) {
            std::cmp::Ordering::Less => MonthScope::Past,
            std::cmp::Ordering::Equal => MonthScope::Current,
            std::cmp::Ordering::Greater => MonthScope::Future,
        }
    }

    pub fn is_past_month(clock: &dyn Clock, year: i32, month: u32) -> bool {
        Self::month_scope(clock, year, month) == MonthScope::Past
    }

    pub fn is_current_month(clock: &dyn Clock, year: i32, month: u32) -> bool {
        Self::month_scope(clock, year, month) == MonthScope::Current
    }

    pub fn is_future_month(clock: &dyn Clock, year: i32, month: u32) -> bool {
        Self::month_scope(clock, year, month) == MonthScope::Future
    }

    /// Distinct years holding at least one month, ascending.
    pub fn years_with_budgets(state: &AppState) -> Vec<i32> {
        state
            .budgets
            .keys()
            .map(|key| key.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn months_for_year(state: &AppState, year: i32) -> Vec<u32> {
        state
            .budgets
            .keys()
            .filter(|key| key.year == year)
            .map(|key| key.month)
            .collect()
    }

    /// First month of `year` without a budget, or `None` when the year is full.
    pub fn next_month_to_add(state: &AppState, year: i32) -> Option<u32> {
        (1..=12).find(|month| {
            BudgetMonthKey::new(year, *month)
                .map(|key| !state.budgets.contains_key(&key))
                .unwrap_or(false)
        })
    }

    /// Year that would be opened next: one past the latest budget year, or today's year.
    ///
    /// Only offered once the preceding December exists and the year stays within
    /// `window` years of today.
    pub fn future_year_to_add(state: &AppState, clock: &dyn Clock, window: i32) -> Option<i32> {
        let candidate = state
            .latest_budget_key()
            .map(|key| key.year + 1)
            .unwrap_or_else(|| clock.today().year());
        let december = BudgetMonthKey::new(candidate - 1, 12)?;
        let within_window = candidate <= clock.today().year() + window;
        (state.budgets.contains_key(&december) && within_window).then_some(candidate)
    }

    pub fn can_add_future_year(state: &AppState, clock: &dyn Clock, window: i32) -> bool {
        Self::future_year_to_add(state, clock, window).is_some()
    }
}
