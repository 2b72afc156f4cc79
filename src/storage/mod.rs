pub mod json_backend;
pub mod memory;

use crate::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Key/value persistence for serialized state records.
///
/// Implementations store opaque strings; interpreting them is the loader's job.
pub trait StorageBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
