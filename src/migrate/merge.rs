//! Final load stage: repair and filter a monthly document into a valid [`AppState`].

use std::collections::BTreeMap;

use crate::domain::{
    catalog::{self, is_retired_category, EXPENSE_NOTES_CATEGORY_IDS},
    AppState, BudgetMonthKey, Category, MonthlyBudget, CURRENT_SCHEMA_VERSION,
};

use super::{MonthRecord, MonthlyDocument};

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub state: AppState,
    pub dropped_spend_keys: usize,
    pub repaired_months: Vec<BudgetMonthKey>,
}

/// Produces a state where every invariant holds:
///
/// * retired categories are gone from every month;
/// * every month has a category list (malformed ones borrow from a neighbour);
/// * seed months that are absent or empty are back-filled from a populated sibling;
/// * at least one month exists and the selection points at one;
/// * allow-listed note ids are present;
/// * spend maps only reference lines of the selected month.
///
/// Running it on its own output changes nothing.
pub fn normalize(document: MonthlyDocument, seed_months: &[BudgetMonthKey]) -> Normalized {
    let MonthlyDocument {
        budgets,
        selected_budget_key,
        carried,
    } = document;

    let (mut budgets, mut repaired_months) = repair_months(budgets);
    if budgets.is_empty() {
        budgets = AppState::seeded(seed_months).budgets;
    } else {
        repaired_months.extend(backfill_seed_months(&mut budgets, seed_months));
        repaired_months.sort();
        repaired_months.dedup();
    }
    for key in &repaired_months {
        tracing::info!(month = %key, "rebuilt budget month with missing categories");
    }

    let selected_budget_key = selected_budget_key
        .filter(|key| budgets.contains_key(key))
        .or_else(|| budgets.keys().next_back().copied());

    let mut state = AppState {
        schema_version: CURRENT_SCHEMA_VERSION,
        budgets,
        selected_budget_key,
        expense_spent: carried.expense_spent,
        expense_other_spent: carried.expense_other_spent,
        expense_notes: carried.expense_notes,
        other_person_name: carried.other_person_name,
    };
    for id in EXPENSE_NOTES_CATEGORY_IDS {
        state.expense_notes.entry(id.to_string()).or_default();
    }
    let dropped_spend_keys = state.prune_spend_maps();

    Normalized {
        state,
        dropped_spend_keys,
        repaired_months,
    }
}

fn repair_months(
    records: BTreeMap<BudgetMonthKey, MonthRecord>,
) -> (BTreeMap<BudgetMonthKey, MonthlyBudget>, Vec<BudgetMonthKey>) {
    let intact: BTreeMap<BudgetMonthKey, Vec<Category>> = records
        .iter()
        .filter_map(|(key, record)| match record {
            MonthRecord::Intact(month) => Some((*key, without_retired(&month.categories))),
            MonthRecord::Malformed { .. } => None,
        })
        .collect();

    let mut repaired = Vec::new();
    let budgets = records
        .into_iter()
        .map(|(key, record)| {
            let month = match record {
                MonthRecord::Intact(mut month) => {
                    month
                        .categories
                        .retain(|category| !is_retired_category(&category.id));
                    month.year = key.year;
                    month.month = key.month;
                    month
                }
                MonthRecord::Malformed {
                    gross_income,
                    net_income,
                } => {
                    repaired.push(key);
                    MonthlyBudget {
                        gross_income,
                        net_income,
                        ..MonthlyBudget::new(key, borrowed_categories(&intact, key))
                    }
                }
            };
            (key, month)
        })
        .collect();
    (budgets, repaired)
}

/// Seed months that are absent or hold no categories take a copy of the nearest
/// populated month's categories, earlier first, else the seed catalog.
fn backfill_seed_months(
    budgets: &mut BTreeMap<BudgetMonthKey, MonthlyBudget>,
    seed_months: &[BudgetMonthKey],
) -> Vec<BudgetMonthKey> {
    let mut filled = Vec::new();
    for &key in seed_months {
        if budgets
            .get(&key)
            .is_some_and(|month| !month.categories.is_empty())
        {
            continue;
        }
        let categories = budgets
            .range(..key)
            .rev()
            .chain(budgets.range(key..))
            .map(|(_, month)| &month.categories)
            .find(|categories| !categories.is_empty())
            .cloned()
            .unwrap_or_else(catalog::initial_categories);
        budgets
            .entry(key)
            .or_insert_with(|| MonthlyBudget::new(key, Vec::new()))
            .categories = categories;
        filled.push(key);
    }
    filled
}

/// Categories of the nearest intact month, earlier first, else the seed catalog.
fn borrowed_categories(
    intact: &BTreeMap<BudgetMonthKey, Vec<Category>>,
    key: BudgetMonthKey,
) -> Vec<Category> {
    intact
        .range(..key)
        .next_back()
        .or_else(|| intact.range(key..).next())
        .map(|(_, categories)| categories.clone())
        .unwrap_or_else(catalog::initial_categories)
}

fn without_retired(categories: &[Category]) -> Vec<Category> {
    categories
        .iter()
        .filter(|category| !is_retired_category(&category.id))
        .cloned()
        .collect()
}
