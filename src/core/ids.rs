//! Unique id generation for user-created categories and sub-categories.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Hands out ids that are unique within their scope and never contain the key separator.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}

/// Random v4 UUIDs in simple (hyphen-free) form, e.g. `cat-3f2a…`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }
}

/// Monotonic counter, deterministic across runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{value}")
    }
}
