use crate::domain::{
    keys::{budget_key, category_total},
    AppState, BudgetTotals, Category, CategoryTotals,
};

const DEFAULT_OTHER_PERSON_LABEL: &str = "Them";
const DEFAULT_OTHER_PERSON_POSSESSIVE: &str = "Their";

/// Budget-versus-spend views over the selected month.
pub struct SummaryService;

impl SummaryService {
    pub fn total_budget(state: &AppState) -> f64 {
        state.categories().iter().map(category_total).sum()
    }

    /// Own plus partner spend across the selected month.
    pub fn total_spent(state: &AppState) -> f64 {
        Self::totals(state).spent
    }

    pub fn remaining(state: &AppState) -> f64 {
        Self::total_budget(state) - Self::total_spent(state)
    }

    pub fn totals(state: &AppState) -> BudgetTotals {
        let (mine, other) = state
            .categories()
            .iter()
            .map(|category| Self::category_spend(state, category))
            .fold((0.0, 0.0), |(mine, other), (m, o)| (mine + m, other + o));
        BudgetTotals::from_parts(Self::total_budget(state), mine, other)
    }

    /// Totals for one category of the selected month, if it exists.
    pub fn category_totals(state: &AppState, category_id: &str) -> Option<CategoryTotals> {
        state
            .categories()
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| Self::summarize(state, category))
    }

    pub fn per_category(state: &AppState) -> Vec<CategoryTotals> {
        state
            .categories()
            .iter()
            .map(|category| Self::summarize(state, category))
            .collect()
    }

    /// Partner display name, or `"Them"` when unset.
    pub fn other_person_label(state: &AppState) -> String {
        match state.other_person_name.trim() {
            "" => DEFAULT_OTHER_PERSON_LABEL.to_string(),
            name => name.to_string(),
        }
    }

    pub fn other_person_possessive(state: &AppState) -> String {
        match state.other_person_name.trim() {
            "" => DEFAULT_OTHER_PERSON_POSSESSIVE.to_string(),
            name => format!("{name}'s"),
        }
    }

    fn summarize(state: &AppState, category: &Category) -> CategoryTotals {
        let (mine, other) = Self::category_spend(state, category);
        CategoryTotals {
            category_id: category.id.clone(),
            name: category.name.clone(),
            totals: BudgetTotals::from_parts(category_total(category), mine, other),
        }
    }

    fn category_spend(state: &AppState, category: &Category) -> (f64, f64) {
        category
            .sub_categories
            .iter()
            .map(|sub| budget_key(&category.id, &sub.id))
            .fold((0.0, 0.0), |(mine, other), key| {
                (
                    mine + state.expense_spent.get(&key).copied().unwrap_or(0.0),
                    other + state.expense_other_spent.get(&key).copied().unwrap_or(0.0),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{CategoryService, ExpenseService};
    use crate::domain::{BudgetMonthKey, BudgetStatus};

    fn state_with_house_spend() -> AppState {
        let state = AppState::seeded(&[BudgetMonthKey::new(2026, 2).unwrap()]);
        let state = CategoryService::set_sub_category_budget(&state, "house", "rent", 1000.0)
            .unwrap();
        let state = CategoryService::set_sub_category_budget(&state, "house", "gas", 50.0)
            .unwrap();
        let state = ExpenseService::set_expense_spent(&state, "house_rent", 600.0).unwrap();
        let state = ExpenseService::set_expense_other_spent(&state, "house_rent", 400.0).unwrap();
        ExpenseService::set_expense_spent(&state, "house_gas", 75.0).unwrap()
    }

    #[test]
    fn whole_month_totals_include_partner_spend() {
        let state = state_with_house_spend();
        assert_eq!(SummaryService::total_budget(&state), 1050.0);
        assert_eq!(SummaryService::total_spent(&state), 1075.0);
        assert_eq!(SummaryService::remaining(&state), -25.0);
        let totals = SummaryService::totals(&state);
        assert_eq!(totals.spent_mine, 675.0);
        assert_eq!(totals.spent_other, 400.0);
        assert_eq!(totals.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn per_category_breakdown_matches_catalog_order() {
        let state = state_with_house_spend();
        let rows = SummaryService::per_category(&state);
        assert_eq!(rows.len(), state.categories().len());
        assert_eq!(rows[0].category_id, "house");
        assert_eq!(rows[0].totals.percent_used, 100.0);
        let car = SummaryService::category_totals(&state, "car").unwrap();
        assert_eq!(car.totals.status, BudgetStatus::Empty);
        assert!(SummaryService::category_totals(&state, "pets").is_none());
    }

    #[test]
    fn partner_labels_fall_back_when_unset() {
        let state = AppState::seeded(&[BudgetMonthKey::new(2026, 2).unwrap()]);
        assert_eq!(SummaryService::other_person_label(&state), "Them");
        assert_eq!(SummaryService::other_person_possessive(&state), "Their");
        let state = ExpenseService::set_other_person_name(&state, " Alex ").unwrap();
        assert_eq!(SummaryService::other_person_label(&state), "Alex");
        assert_eq!(SummaryService::other_person_possessive(&state), "Alex's");
    }
}
