use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    domain::BudgetMonthKey,
    errors::StoreError,
    utils::persistence::{ensure_dir, read_optional, write_atomic},
};

const APP_DIR_NAME: &str = "fintrack";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";
pub const DEFAULT_STORAGE_KEY: &str = "fintrack-data";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Record name the budget state is stored under.
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Months created for brand-new or unrecoverable data.
    pub seed_months: Vec<BudgetMonthKey>,
    /// How many years past the current one may be opened.
    pub future_year_window: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
            seed_months: default_seed_months(),
            future_year_window: 1,
            log_filter: None,
        }
    }
}

impl Config {
    /// Explicit `data_dir`, else `<base>/data`.
    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| base.join(DATA_DIR))
    }
}

/// The months a fresh install starts with, `2026-1` and `2026-2`.
pub fn default_seed_months() -> Vec<BudgetMonthKey> {
    [(2026, 1), (2026, 2)]
        .into_iter()
        .filter_map(|(year, month)| BudgetMonthKey::new(year, month))
        .collect()
}

/// Application data root, `<local data dir>/fintrack`.
pub fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_dir(default_base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StoreError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Missing file yields defaults.
    pub fn load(&self) -> Result<Config, StoreError> {
        match read_optional(&self.path)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Config::default()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
