mod common;

use common::{month, seed_months, store_from_json};
use fintrack_core::{
    migrate::{load_state, PersistedSchema},
    storage::StorageBackend,
    AppState,
};
use serde_json::json;

fn amount(state: &AppState, category: &str, sub: &str) -> Option<f64> {
    state
        .selected_budget()?
        .category(category)?
        .sub_category(sub)
        .map(|line| line.amount)
}

#[test]
fn flat_budget_strings_become_numbers() {
    let raw = json!({ "budget": { "house_rent": "150" } }).to_string();
    let report = load_state(Some(&raw), &seed_months());
    assert_eq!(report.source, PersistedSchema::FlatBudget);
    assert_eq!(report.migrations.len(), 2);
    assert_eq!(amount(&report.state, "house", "rent"), Some(150.0));
    assert_eq!(amount(&report.state, "house", "gas"), Some(0.0));
    assert_eq!(report.state.budgets.len(), 2);
    assert_eq!(report.state.selected_budget_key, Some(month(2026, 2)));
}

#[test]
fn flat_budget_carries_spend_notes_and_partner() {
    let raw = json!({
        "budget": { "subscriptions": 40, "phone-bill": 25, "car_fuel": "abc" },
        "expenseSpent": { "subscriptions": "38.5", "phone-bill": 25, "house_rent": 900 },
        "expenseOtherSpent": { "going-out": 20 },
        "expenseNotes": { "subscriptions": "music, video" },
        "otherPersonName": "Sam"
    })
    .to_string();
    let report = load_state(Some(&raw), &seed_months());
    let state = &report.state;

    assert_eq!(amount(state, "subscriptions", "subscriptions"), Some(40.0));
    assert_eq!(amount(state, "car", "fuel"), Some(0.0));
    assert!(state.selected_budget().unwrap().category("phone-bill").is_none());
    assert_eq!(state.expense_spent.get("subscriptions_subscriptions"), Some(&38.5));
    assert_eq!(state.expense_spent.get("house_rent"), Some(&900.0));
    assert_eq!(state.expense_other_spent.get("going-out_going-out"), Some(&20.0));
    assert_eq!(report.dropped_spend_keys, 1);
    assert_eq!(state.expense_notes["subscriptions"], "music, video");
    assert_eq!(state.expense_notes["going-out"], "");
    assert_eq!(state.other_person_name, "Sam");
}

#[test]
fn flat_categories_are_wrapped_into_months() {
    let raw = json!({
        "categories": [
            { "id": "house", "name": "Home", "subCategories": [
                { "id": "rent", "name": "Rent", "amount": 1200 }
            ]},
            { "id": "phone-bill", "name": "Phone", "subCategories": [
                { "id": "phone-bill", "name": "Phone", "amount": 30 }
            ]}
        ],
        "expenseSpent": { "house_rent": 1200, "car_fuel": 60 }
    })
    .to_string();
    let report = load_state(Some(&raw), &seed_months());
    assert_eq!(report.source, PersistedSchema::FlatCategories);
    let state = &report.state;
    for budget in state.budgets.values() {
        assert_eq!(budget.categories.len(), 1);
        assert_eq!(budget.categories[0].name, "Home");
    }
    assert_eq!(state.expense_spent.len(), 1);
    assert_eq!(report.dropped_spend_keys, 1);
}

#[test]
fn monthly_data_is_coerced_and_filtered() {
    let raw = json!({
        "budgets": {
            "2025-12": { "year": 2025, "month": 12, "categories": [
                { "id": "house", "name": "House", "subCategories": [
                    { "id": "rent", "name": "Rent", "amount": "-5" },
                    { "id": "gas", "name": "Gas", "amount": null }
                ]}
            ], "grossIncome": "4000", "netIncome": true },
            "2026-1": { "year": 2026, "month": 1 },
            "bogus": { "categories": [] }
        },
        "selectedBudgetKey": "2026-1",
        "expenseSpent": { "house_gas": 10, "ghost_line": 99 },
        "expenseNotes": { "custom": "kept" }
    })
    .to_string();
    let report = load_state(Some(&raw), &seed_months());
    let state = &report.state;

    assert_eq!(report.source, PersistedSchema::Monthly);
    assert_eq!(state.budgets.len(), 3);
    assert_eq!(report.repaired_months, vec![month(2026, 1), month(2026, 2)]);

    let december = &state.budgets[&month(2025, 12)];
    assert_eq!(december.gross_income, 4000.0);
    assert_eq!(december.net_income, 0.0);
    assert!(december.categories[0]
        .sub_categories
        .iter()
        .all(|sub| sub.amount == 0.0));

    let january = &state.budgets[&month(2026, 1)];
    assert_eq!(january.categories, december.categories);
    assert_eq!(state.selected_budget_key, Some(month(2026, 1)));
    assert_eq!(state.expense_spent.len(), 1);
    assert_eq!(state.expense_notes["custom"], "kept");
}

#[test]
fn empty_seed_month_is_back_filled_from_its_sibling() {
    let raw = json!({
        "budgets": {
            "2026-1": { "year": 2026, "month": 1, "categories": [], "netIncome": 2500 },
            "2026-2": { "year": 2026, "month": 2, "categories": [
                { "id": "house", "name": "House", "subCategories": [
                    { "id": "rent", "name": "Rent", "amount": 1100 }
                ]}
            ]}
        },
        "selectedBudgetKey": "2026-1"
    })
    .to_string();
    let report = load_state(Some(&raw), &seed_months());
    assert_eq!(report.repaired_months, vec![month(2026, 1)]);
    let state = &report.state;
    let january = &state.budgets[&month(2026, 1)];
    assert_eq!(january.categories, state.budgets[&month(2026, 2)].categories);
    assert_eq!(january.net_income, 2500.0);
    assert_eq!(amount(state, "house", "rent"), Some(1100.0));
}

#[test]
fn missing_seed_month_is_restored() {
    let raw = json!({
        "budgets": {
            "2026-2": { "year": 2026, "month": 2, "categories": [
                { "id": "car", "name": "Car", "subCategories": [
                    { "id": "fuel", "name": "Fuel", "amount": 80 }
                ]}
            ]}
        },
        "selectedBudgetKey": "2026-2",
        "expenseSpent": { "car_fuel": 35 }
    })
    .to_string();
    let report = load_state(Some(&raw), &seed_months());
    let state = &report.state;
    assert_eq!(
        state.budgets.keys().copied().collect::<Vec<_>>(),
        vec![month(2026, 1), month(2026, 2)]
    );
    assert_eq!(
        state.budgets[&month(2026, 1)].categories,
        state.budgets[&month(2026, 2)].categories
    );
    assert_eq!(state.selected_budget_key, Some(month(2026, 2)));
    assert_eq!(state.expense_spent.get("car_fuel"), Some(&35.0));

    let rewritten = serde_json::to_string(state).expect("serialize");
    let reloaded = load_state(Some(&rewritten), &seed_months());
    assert_eq!(reloaded.state, *state);
    assert!(reloaded.repaired_months.is_empty());
}

#[test]
fn repeated_ids_in_a_stored_month_keep_the_first() {
    let raw = json!({
        "budgets": {
            "2026-2": { "year": 2026, "month": 2, "categories": [
                { "id": "house", "name": "House", "subCategories": [
                    { "id": "rent", "name": "Rent", "amount": 1000 },
                    { "id": "rent", "name": "Rent (copy)", "amount": 1 }
                ]},
                { "id": "house", "name": "House (copy)", "subCategories": [] }
            ]}
        },
        "selectedBudgetKey": "2026-2"
    })
    .to_string();
    let state = load_state(Some(&raw), &seed_months()).state;
    let categories = state.categories();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].sub_categories.len(), 1);
    assert_eq!(amount(&state, "house", "rent"), Some(1000.0));
}

#[test]
fn missing_selection_picks_latest_month() {
    let raw = json!({
        "budgets": {
            "2026-1": { "year": 2026, "month": 1, "categories": [] },
            "2026-10": { "year": 2026, "month": 10, "categories": [] }
        }
    })
    .to_string();
    let state = load_state(Some(&raw), &seed_months()).state;
    assert_eq!(state.selected_budget_key, Some(month(2026, 10)));
}

#[test]
fn non_object_documents_fall_back_to_seed() {
    for raw in ["null", "[]", "42", "\"text\"", "{"] {
        let report = load_state(Some(raw), &seed_months());
        assert_eq!(report.source, PersistedSchema::Unreadable, "{raw}");
        assert_eq!(report.state, AppState::seeded(&seed_months()));
    }
}

#[test]
fn store_rewrites_legacy_record_in_current_shape() {
    let store = store_from_json(r#"{"budget":{"house_rent":"150"}}"#);
    assert!(store.load_report().was_migrated());
    let written = store
        .storage()
        .read(common::STORAGE_KEY)
        .expect("read")
        .expect("record");
    let value: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert!(value["budgets"].is_object());
    assert_eq!(value["schemaVersion"], 3);
    assert!(value.get("budget").is_none());
}
