mod common;

use common::memory_store;
use fintrack_core::{
    core::services::MonthScope,
    domain::BudgetStatus,
    utils::format_amount,
};

#[test]
fn totals_combine_own_and_partner_spend() {
    let mut store = memory_store();
    store.set_sub_category_budget("house", "rent", 1200.0);
    store.set_sub_category_budget("groceries", "groceries", 400.0);
    store.set_expense_spent("house_rent", 700.0);
    store.set_expense_other_spent("house_rent", 500.0);
    store.set_expense_spent("groceries_groceries", 150.25);

    assert_eq!(store.total_budget(), 1600.0);
    assert_eq!(store.total_spent(), 1350.25);
    assert_eq!(store.remaining(), 249.75);
    assert_eq!(format_amount(store.remaining()), "249.75");

    let house = store.category_totals("house").expect("house");
    assert_eq!(house.totals.status, BudgetStatus::OnTrack);
    assert_eq!(house.totals.percent_used, 100.0);
    let groceries = store.category_totals("groceries").expect("groceries");
    assert_eq!(groceries.totals.status, BudgetStatus::UnderBudget);
    assert!((groceries.totals.percent_used - 37.5625).abs() < 1e-9);

    let rows = store.per_category();
    assert_eq!(rows.len(), store.categories().len());
    assert_eq!(
        rows.iter().map(|row| row.totals.spent).sum::<f64>(),
        store.total_spent()
    );
}

#[test]
fn totals_follow_the_selected_month() {
    let mut store = memory_store();
    store.set_sub_category_budget("house", "rent", 1000.0);
    store.set_expense_spent("house_rent", 1000.0);
    assert!(store.set_selected_budget("2026-1"));
    assert_eq!(store.total_budget(), 0.0);
    assert_eq!(store.total_spent(), 0.0);
    assert_eq!(store.totals().status, BudgetStatus::Empty);
}

#[test]
fn calendar_views_use_the_injected_clock() {
    let mut store = memory_store();
    assert_eq!(store.month_scope(2026, 1), MonthScope::Past);
    assert!(store.is_current_month(2026, 2));
    assert!(store.is_future_month(2026, 3));
    assert!(store.is_past_month(2025, 12));

    assert_eq!(store.years_with_budgets(), vec![2026]);
    assert_eq!(store.months_for_year(2026), vec![1, 2]);
    assert_eq!(store.next_month_to_add(2026), Some(3));

    assert!(!store.can_add_future_year());
    for month in 3..=12 {
        assert!(store.add_budget_month(2026, month));
    }
    assert_eq!(store.next_month_to_add(2026), None);
    assert!(store.can_add_future_year());
    assert!(store.add_budget_month(2027, 1));
    assert_eq!(store.years_with_budgets(), vec![2026, 2027]);
    assert!(!store.can_add_future_year());
}

#[test]
fn partner_label_defaults() {
    let mut store = memory_store();
    assert_eq!(store.other_person_label(), "Them");
    store.set_other_person_name("   ");
    assert_eq!(store.other_person_possessive(), "Their");
    store.set_other_person_name("Jo");
    assert_eq!(store.other_person_label(), "Jo");
}
