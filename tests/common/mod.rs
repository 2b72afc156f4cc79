#![allow(dead_code)]

use std::sync::Mutex;

use fintrack_core::{
    config::{Config, ConfigManager},
    core::{ids::SequentialIds, time::FixedClock},
    storage::{JsonFileStorage, MemoryStorage, StorageBackend},
    BudgetMonthKey, BudgetStore, StoreOptions,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const STORAGE_KEY: &str = "fintrack-data";

pub fn month(year: i32, month: u32) -> BudgetMonthKey {
    BudgetMonthKey::new(year, month).expect("valid month")
}

pub fn seed_months() -> Vec<BudgetMonthKey> {
    vec![month(2026, 1), month(2026, 2)]
}

/// Deterministic store over any backend: sequential ids, clock pinned to 2026-02-10.
pub fn store_with(storage: Box<dyn StorageBackend>) -> BudgetStore {
    BudgetStore::open(storage, StoreOptions::default())
        .with_ids(Box::new(SequentialIds::new()))
        .with_clock(Box::new(FixedClock::on(2026, 2, 10).expect("valid date")))
}

pub fn memory_store() -> BudgetStore {
    store_with(Box::new(MemoryStorage::new()))
}

/// Store opened over a record already holding `json`.
pub fn store_from_json(json: &str) -> BudgetStore {
    store_with(Box::new(MemoryStorage::new().with_record(STORAGE_KEY, json)))
}

/// Creates isolated file-backed storage and config in a unique directory.
pub fn setup_test_env() -> (JsonFileStorage, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let data_dir = Config::default().resolve_data_dir(&base);
    let storage = JsonFileStorage::new(data_dir).expect("create json storage backend");
    (storage, config_manager)
}

/// Every spend key addresses a line of the selected month.
pub fn assert_key_integrity(store: &BudgetStore) {
    let valid = store.state().valid_keys();
    for key in store
        .expense_spent()
        .keys()
        .chain(store.expense_other_spent().keys())
    {
        assert!(valid.contains(key), "orphan spend key `{key}`");
    }
}

/// Every stored amount is finite and non-negative.
pub fn assert_non_negative(store: &BudgetStore) {
    for budget in store.budgets().values() {
        assert!(budget.gross_income >= 0.0 && budget.net_income >= 0.0);
        for category in &budget.categories {
            for sub in &category.sub_categories {
                assert!(sub.amount.is_finite() && sub.amount >= 0.0, "{}", sub.id);
            }
        }
    }
    for value in store
        .expense_spent()
        .values()
        .chain(store.expense_other_spent().values())
    {
        assert!(value.is_finite() && *value >= 0.0);
    }
}
