//! Turns whatever is in storage into a valid, current-schema [`AppState`].
//!
//! Loading runs as a pipeline: [`detect`] classifies the raw document into a
//! [`PersistedDocument`], pure step functions in [`legacy`] lift older shapes one
//! version at a time, and [`merge::normalize`] repairs and filters the result.
//! None of the stages fail; unusable input falls back to seeded defaults.

pub mod legacy;
pub mod lenient;
pub mod merge;

use std::{collections::BTreeMap, fmt};

use serde_json::Value;

use crate::domain::{AppState, BudgetMonthKey, Category, MonthlyBudget};

/// Storage shape recognised on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedSchema {
    Absent,
    Unreadable,
    /// v1: a numeric `budget` map keyed by flat category/line keys.
    FlatBudget,
    /// v2: a single `categories` list with no month wrapping.
    FlatCategories,
    /// v3: `budgets` keyed by `"{year}-{month}"`.
    Monthly,
}

impl PersistedSchema {
    pub fn version(self) -> Option<u8> {
        match self {
            PersistedSchema::Absent | PersistedSchema::Unreadable => None,
            PersistedSchema::FlatBudget => Some(1),
            PersistedSchema::FlatCategories => Some(2),
            PersistedSchema::Monthly => Some(3),
        }
    }
}

impl fmt::Display for PersistedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PersistedSchema::Absent => "absent",
            PersistedSchema::Unreadable => "unreadable",
            PersistedSchema::FlatBudget => "flat-budget",
            PersistedSchema::FlatCategories => "flat-categories",
            PersistedSchema::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

/// Record data that every schema carries alongside its budget shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarriedData {
    pub expense_spent: BTreeMap<String, f64>,
    pub expense_other_spent: BTreeMap<String, f64>,
    pub expense_notes: BTreeMap<String, String>,
    pub other_person_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatBudgetDocument {
    pub budget: BTreeMap<String, f64>,
    pub carried: CarriedData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatCategoriesDocument {
    pub categories: Vec<Category>,
    pub gross_income: f64,
    pub net_income: f64,
    pub carried: CarriedData,
}

/// A stored month: either usable as-is or in need of a category tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthRecord {
    Intact(MonthlyBudget),
    Malformed { gross_income: f64, net_income: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyDocument {
    pub budgets: BTreeMap<BudgetMonthKey, MonthRecord>,
    pub selected_budget_key: Option<BudgetMonthKey>,
    pub carried: CarriedData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistedDocument {
    FlatBudget(FlatBudgetDocument),
    FlatCategories(FlatCategoriesDocument),
    Monthly(MonthlyDocument),
}

impl PersistedDocument {
    pub fn schema(&self) -> PersistedSchema {
        match self {
            PersistedDocument::FlatBudget(_) => PersistedSchema::FlatBudget,
            PersistedDocument::FlatCategories(_) => PersistedSchema::FlatCategories,
            PersistedDocument::Monthly(_) => PersistedSchema::Monthly,
        }
    }
}

/// Outcome of a load, for logging and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub state: AppState,
    pub source: PersistedSchema,
    pub migrations: Vec<&'static str>,
    pub dropped_spend_keys: usize,
    pub repaired_months: Vec<BudgetMonthKey>,
}

impl LoadReport {
    /// True when the stored bytes did not already match the loaded state's shape.
    pub fn was_migrated(&self) -> bool {
        !self.migrations.is_empty()
    }
}

/// Classifies a parsed document. Returns `None` for anything but a JSON object.
pub fn detect(value: &Value) -> Option<PersistedDocument> {
    let root = value.as_object()?;
    let carried = CarriedData {
        expense_spent: lenient::number_map(root.get("expenseSpent")),
        expense_other_spent: lenient::number_map(root.get("expenseOtherSpent")),
        expense_notes: lenient::string_map(root.get("expenseNotes")),
        other_person_name: lenient::string(root.get("otherPersonName")),
    };

    if let Some(budgets) = lenient::object(root.get("budgets")) {
        return Some(PersistedDocument::Monthly(MonthlyDocument {
            budgets: month_records(budgets),
            selected_budget_key: root
                .get("selectedBudgetKey")
                .and_then(Value::as_str)
                .and_then(|raw| raw.parse().ok()),
            carried,
        }));
    }

    if let Some(categories) = lenient::categories(root.get("categories")) {
        return Some(PersistedDocument::FlatCategories(FlatCategoriesDocument {
            categories,
            gross_income: lenient::amount(root.get("grossIncome")),
            net_income: lenient::amount(root.get("netIncome")),
            carried,
        }));
    }

    Some(PersistedDocument::FlatBudget(FlatBudgetDocument {
        budget: lenient::number_map(root.get("budget")),
        carried,
    }))
}

fn month_records(budgets: &serde_json::Map<String, Value>) -> BTreeMap<BudgetMonthKey, MonthRecord> {
    let mut records = BTreeMap::new();
    for (raw_key, value) in budgets {
        let Ok(key) = raw_key.parse::<BudgetMonthKey>() else {
            tracing::warn!(key = %raw_key, "dropping budget month with unreadable key");
            continue;
        };
        let gross_income = lenient::amount(value.get("grossIncome"));
        let net_income = lenient::amount(value.get("netIncome"));
        let record = match lenient::categories(value.get("categories")) {
            Some(categories) => MonthRecord::Intact(MonthlyBudget {
                gross_income,
                net_income,
                ..MonthlyBudget::new(key, categories)
            }),
            None => MonthRecord::Malformed {
                gross_income,
                net_income,
            },
        };
        records.insert(key, record);
    }
    records
}

/// Loads the stored record, migrating and repairing as needed.
///
/// `raw` is `None` when nothing is stored. `seed_months` are the months created
/// when the data carries no usable months of its own.
pub fn load_state(raw: Option<&str>, seed_months: &[BudgetMonthKey]) -> LoadReport {
    let parsed = match raw {
        None => Err(PersistedSchema::Absent),
        Some(text) => serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|value| detect(&value))
            .ok_or(PersistedSchema::Unreadable),
    };

    let document = match parsed {
        Ok(document) => document,
        Err(source) => {
            if source == PersistedSchema::Unreadable {
                tracing::warn!("stored budget data is unreadable; starting from defaults");
            }
            return LoadReport {
                state: AppState::seeded(seed_months),
                source,
                migrations: Vec::new(),
                dropped_spend_keys: 0,
                repaired_months: Vec::new(),
            };
        }
    };

    let source = document.schema();
    let mut migrations = Vec::new();
    let monthly = match document {
        PersistedDocument::FlatBudget(flat) => {
            migrations.push(legacy::FLAT_BUDGET_TO_FLAT_CATEGORIES);
            migrations.push(legacy::FLAT_CATEGORIES_TO_MONTHLY);
            legacy::flat_categories_to_monthly(legacy::flat_budget_to_flat_categories(flat), seed_months)
        }
        PersistedDocument::FlatCategories(flat) => {
            migrations.push(legacy::FLAT_CATEGORIES_TO_MONTHLY);
            legacy::flat_categories_to_monthly(flat, seed_months)
        }
        PersistedDocument::Monthly(monthly) => monthly,
    };

    let normalized = merge::normalize(monthly, seed_months);
    let report = LoadReport {
        state: normalized.state,
        source,
        migrations,
        dropped_spend_keys: normalized.dropped_spend_keys,
        repaired_months: normalized.repaired_months,
    };
    tracing::info!(
        source = %report.source,
        migrations = ?report.migrations,
        dropped_spend_keys = report.dropped_spend_keys,
        repaired_months = report.repaired_months.len(),
        "budget data loaded"
    );
    report
}
