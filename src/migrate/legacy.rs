//! Step functions lifting older storage shapes one version forward.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    catalog::{self, SEED_CATALOG},
    keys::budget_key,
    BudgetMonthKey, MonthlyBudget,
};

use super::{
    CarriedData, FlatBudgetDocument, FlatCategoriesDocument, MonthRecord, MonthlyDocument,
};

pub const FLAT_BUDGET_TO_FLAT_CATEGORIES: &str = "flat-budget -> flat-categories";
pub const FLAT_CATEGORIES_TO_MONTHLY: &str = "flat-categories -> monthly";

/// Rebuilds the nested tree from the seed catalog, reading each line's amount from
/// the flat map. Flat keys are rewritten to nested keys in every map.
pub fn flat_budget_to_flat_categories(document: FlatBudgetDocument) -> FlatCategoriesDocument {
    let remap = legacy_key_remap();
    let budget = remap_keys(document.budget, &remap);

    let mut categories = catalog::initial_categories();
    for category in &mut categories {
        for sub in &mut category.sub_categories {
            if let Some(amount) = budget.get(&budget_key(&category.id, &sub.id)) {
                sub.amount = *amount;
            }
        }
    }

    let carried = CarriedData {
        expense_spent: remap_keys(document.carried.expense_spent, &remap),
        expense_other_spent: remap_keys(document.carried.expense_other_spent, &remap),
        ..document.carried
    };
    FlatCategoriesDocument {
        categories,
        gross_income: 0.0,
        net_income: 0.0,
        carried,
    }
}

/// Wraps the single category list into one month per seed month; the last is selected.
pub fn flat_categories_to_monthly(
    document: FlatCategoriesDocument,
    seed_months: &[BudgetMonthKey],
) -> MonthlyDocument {
    let budgets = seed_months
        .iter()
        .map(|key| {
            let month = MonthlyBudget {
                gross_income: document.gross_income,
                net_income: document.net_income,
                ..MonthlyBudget::new(*key, document.categories.clone())
            };
            (*key, MonthRecord::Intact(month))
        })
        .collect::<BTreeMap<_, _>>();
    let selected_budget_key = budgets.keys().next_back().copied();
    MonthlyDocument {
        budgets,
        selected_budget_key,
        carried: document.carried,
    }
}

/// Flat-era key to nested key, for the entries whose shape changed.
fn legacy_key_remap() -> HashMap<String, String> {
    SEED_CATALOG
        .iter()
        .flat_map(|seed| {
            seed.legacy_keys()
                .into_iter()
                .map(move |(legacy, sub_id)| (legacy, budget_key(seed.id, &sub_id)))
        })
        .filter(|(legacy, nested)| legacy != nested)
        .collect()
}

/// Rewrites keys through `remap`. A nested key already present wins over its legacy twin.
fn remap_keys(
    map: BTreeMap<String, f64>,
    remap: &HashMap<String, String>,
) -> BTreeMap<String, f64> {
    let (legacy, mut current): (BTreeMap<_, _>, BTreeMap<_, _>) = map
        .into_iter()
        .partition(|(key, _)| remap.contains_key(key));
    for (key, value) in legacy {
        if let Some(nested) = remap.get(&key) {
            current.entry(nested.clone()).or_insert(value);
        }
    }
    current
}
