//! Budget data model: categories, months, the persisted root and the seed catalog.

pub mod amount;
pub mod budget;
pub mod catalog;
pub mod category;
pub mod common;
pub mod keys;
pub mod state;
pub mod summary;
pub mod wealth;

pub use amount::{coerce_amount, round_to_cents, sanitize_decimal_input, RawAmount};
pub use budget::{BudgetMonthKey, MonthlyBudget, ParseMonthKeyError};
pub use category::{Category, SubCategory};
pub use common::{Amounted, Identifiable, NamedEntity};
pub use keys::{budget_key, budget_month_key, category_total, split_budget_key};
pub use state::{AppState, CURRENT_SCHEMA_VERSION};
pub use summary::{BudgetStatus, BudgetTotals, CategoryTotals};
pub use wealth::{WealthItem, WealthSheet, WealthSide};
