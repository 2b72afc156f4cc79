use std::{collections::HashMap, sync::Mutex};

use crate::errors::StoreError;

use super::{Result, StorageBackend};

/// In-process key/value storage with an optional per-record size limit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes larger than `limit` bytes, like a full browser store.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            records: Mutex::default(),
            quota: Some(limit),
        }
    }

    pub fn with_record(self, key: &str, data: &str) -> Self {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.to_string(), data.to_string());
        }
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.records
            .lock()
            .map_err(|_| StoreError::Persistence("memory storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            if data.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed: data.len(),
                    limit,
                });
            }
        }
        self.lock()?.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
