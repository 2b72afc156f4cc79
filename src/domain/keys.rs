//! Derivation of budget keys, the join point between the category tree and spend maps.

use std::collections::BTreeSet;

use super::{budget::BudgetMonthKey, category::Category, common::Amounted};

/// Separator between the category and sub-category halves of a budget key.
///
/// Category ids never contain it; sub-category ids may (seeded group lines do).
pub const KEY_SEPARATOR: char = '_';

/// Builds `"{category_id}_{sub_category_id}"`.
pub fn budget_key(category_id: &str, sub_category_id: &str) -> String {
    format!("{category_id}{KEY_SEPARATOR}{sub_category_id}")
}

/// Splits a budget key at the first separator into `(category_id, sub_category_id)`.
pub fn split_budget_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
        .filter(|(category, sub)| !category.is_empty() && !sub.is_empty())
}

/// Prefix shared by every budget key of a category.
pub fn category_key_prefix(category_id: &str) -> String {
    format!("{category_id}{KEY_SEPARATOR}")
}

/// Sum of budgeted amounts across the category's lines.
pub fn category_total(category: &Category) -> f64 {
    category.sub_categories.iter().map(Amounted::amount).sum()
}

pub fn budget_month_key(year: i32, month: u32) -> String {
    BudgetMonthKey { year, month }.to_string()
}

/// Every budget key addressable through `categories`.
pub fn valid_budget_keys(categories: &[Category]) -> BTreeSet<String> {
    categories
        .iter()
        .flat_map(|category| {
            category
                .sub_categories
                .iter()
                .map(move |sub| budget_key(&category.id, &sub.id))
        })
        .collect()
}
