/// Exposes a stable identifier for entities stored in a budget month.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;

    /// Case-insensitive comparison on the trimmed name.
    fn has_name(&self, candidate: &str) -> bool {
        self.name().trim().to_lowercase() == candidate.trim().to_lowercase()
    }
}

/// Supplies a common contract for retrieving budgeted amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<'a, T: Identifiable>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
