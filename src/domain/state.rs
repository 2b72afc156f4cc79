//! Root persisted object: months, selection, spend maps, notes and partner name.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    budget::{BudgetMonthKey, MonthlyBudget},
    catalog::{self, EXPENSE_NOTES_CATEGORY_IDS},
    category::Category,
    keys::valid_budget_keys,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 3;

/// Snapshot of every piece of budgeting state persisted between sessions.
///
/// Values are treated as immutable: services clone, edit the clone, and hand it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default = "AppState::schema_version_default")]
    pub schema_version: u8,
    pub budgets: BTreeMap<BudgetMonthKey, MonthlyBudget>,
    pub selected_budget_key: Option<BudgetMonthKey>,
    #[serde(default)]
    pub expense_spent: BTreeMap<String, f64>,
    #[serde(default)]
    pub expense_other_spent: BTreeMap<String, f64>,
    #[serde(default)]
    pub expense_notes: BTreeMap<String, String>,
    #[serde(default)]
    pub other_person_name: String,
}

impl AppState {
    /// Fresh state with each seed month built from the catalog; the last one is selected.
    pub fn seeded(seed_months: &[BudgetMonthKey]) -> Self {
        let budgets: BTreeMap<_, _> = seed_months
            .iter()
            .map(|key| (*key, MonthlyBudget::new(*key, catalog::initial_categories())))
            .collect();
        let selected_budget_key = budgets.keys().next_back().copied();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            budgets,
            selected_budget_key,
            expense_spent: BTreeMap::new(),
            expense_other_spent: BTreeMap::new(),
            expense_notes: default_notes(),
            other_person_name: String::new(),
        }
    }

    pub fn selected_budget(&self) -> Option<&MonthlyBudget> {
        self.selected_budget_key
            .and_then(|key| self.budgets.get(&key))
    }

    pub fn selected_budget_mut(&mut self) -> Option<&mut MonthlyBudget> {
        let key = self.selected_budget_key?;
        self.budgets.get_mut(&key)
    }

    /// Categories of the selected month, or an empty slice when nothing is selected.
    pub fn categories(&self) -> &[Category] {
        self.selected_budget()
            .map(|budget| budget.categories.as_slice())
            .unwrap_or(&[])
    }

    /// Budget keys that spend maps may reference right now.
    pub fn valid_keys(&self) -> BTreeSet<String> {
        valid_budget_keys(self.categories())
    }

    /// Drops spend entries that no longer address a line of the selected month.
    ///
    /// Returns how many entries were removed.
    pub fn prune_spend_maps(&mut self) -> usize {
        let valid = self.valid_keys();
        let before = self.expense_spent.len() + self.expense_other_spent.len();
        self.expense_spent.retain(|key, _| valid.contains(key));
        self.expense_other_spent.retain(|key, _| valid.contains(key));
        before - (self.expense_spent.len() + self.expense_other_spent.len())
    }

    /// Chronologically latest month, if any.
    pub fn latest_budget_key(&self) -> Option<BudgetMonthKey> {
        self.budgets.keys().next_back().copied()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Notes map with every allow-listed category present and empty.
pub fn default_notes() -> BTreeMap<String, String> {
    EXPENSE_NOTES_CATEGORY_IDS
        .iter()
        .map(|id| (id.to_string(), String::new()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_keys() -> Vec<BudgetMonthKey> {
        vec![
            BudgetMonthKey::new(2026, 1).unwrap(),
            BudgetMonthKey::new(2026, 2).unwrap(),
        ]
    }

    #[test]
    fn seeded_state_selects_latest_month() {
        let state = AppState::seeded(&seed_keys());
        assert_eq!(state.budgets.len(), 2);
        assert_eq!(state.selected_budget_key, BudgetMonthKey::new(2026, 2));
        assert_eq!(state.expense_notes.len(), EXPENSE_NOTES_CATEGORY_IDS.len());
        assert!(state.expense_spent.is_empty());
        assert!(state.other_person_name.is_empty());
    }

    #[test]
    fn prune_removes_keys_outside_selected_month() {
        let mut state = AppState::seeded(&seed_keys());
        state.expense_spent.insert("house_rent".into(), 10.0);
        state.expense_spent.insert("ghost_line".into(), 5.0);
        state.expense_other_spent.insert("pets_food".into(), 1.0);
        assert_eq!(state.prune_spend_maps(), 2);
        assert_eq!(state.expense_spent.len(), 1);
        assert!(state.expense_other_spent.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_record_fields() {
        let state = AppState::seeded(&seed_keys());
        let value = serde_json::to_value(&state).unwrap();
        assert!(value["budgets"]["2026-1"]["categories"].is_array());
        assert_eq!(value["selectedBudgetKey"], "2026-2");
        assert!(value["expenseOtherSpent"].is_object());
        assert!(value["budgets"]["2026-2"]["grossIncome"].is_number());
        assert!(value["budgets"]["2026-2"]["categories"][0]["subCategories"].is_array());
    }
}
