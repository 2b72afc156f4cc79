use thiserror::Error;

/// Error type that captures persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Storage quota exceeded for `{key}` ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}
