//! Domain types representing budget categories and their line items.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Top-level budget grouping (e.g. "House") owning its budgeted lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sub_categories: Vec::new(),
        }
    }

    pub fn with_sub_categories(mut self, sub_categories: Vec<SubCategory>) -> Self {
        self.sub_categories = sub_categories;
        self
    }

    pub fn sub_category(&self, id: &str) -> Option<&SubCategory> {
        find_by_id(&self.sub_categories, id)
    }

    pub fn sub_category_mut(&mut self, id: &str) -> Option<&mut SubCategory> {
        find_by_id_mut(&mut self.sub_categories, id)
    }

    /// Returns `true` when a sibling already uses `name`, ignoring case.
    pub fn has_sub_category_named(&self, name: &str) -> bool {
        self.sub_categories.iter().any(|sub| sub.has_name(name))
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A budgeted line item within a category (e.g. "Rent").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
}

impl SubCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: 0.0,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}

impl Identifiable for SubCategory {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for SubCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for SubCategory {
    fn amount(&self) -> f64 {
        self.amount
    }
}
