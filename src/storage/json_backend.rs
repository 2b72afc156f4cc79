use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::utils::persistence::{ensure_dir, read_optional, write_atomic};

use super::{Result, StorageBackend};

const RECORD_EXTENSION: &str = "json";

/// Stores each key as `<root>/<key>.json`, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{RECORD_EXTENSION}", canonical_key(key)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.record_path(key))
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        let path = self.record_path(key);
        write_atomic(&path, data)?;
        tracing::trace!(path = %path.display(), bytes = data.len(), "record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "state".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_round_trip_and_remove() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path()).expect("storage");
        assert!(storage.read("fintrack-data").expect("read").is_none());

        storage.write("fintrack-data", "{\"budgets\":{}}").expect("write");
        assert_eq!(
            storage.read("fintrack-data").expect("read").as_deref(),
            Some("{\"budgets\":{}}")
        );
        assert!(storage.record_path("fintrack-data").ends_with("fintrack-data.json"));

        storage.remove("fintrack-data").expect("remove");
        storage.remove("fintrack-data").expect("second remove is fine");
        assert!(storage.read("fintrack-data").expect("read").is_none());
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path()).expect("storage");
        let path = storage.record_path("../Outside Key");
        assert_eq!(path.parent(), Some(dir.path()));
        assert!(path.ends_with("___outside_key.json"));
    }
}
